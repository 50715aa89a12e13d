//! `sealer` — hybrid RSA + AES-256-GCM envelope encryption for KBS resources.
//!
//! A resource is sealed by drawing a fresh 256-bit content-encryption key,
//! encrypting the payload with AES-256-GCM, wrapping that key with the
//! recipient's RSA public key (`RSA-OAEP-256` or `RSA1_5`), and emitting the
//! results as a Base64 JSON [`Envelope`].
//!
//! ```no_run
//! # fn main() -> Result<(), sealer::EnvelopeError> {
//! let public_key = sealer::keys::read_public_key("pub.pem".as_ref())?;
//! let envelope = sealer::seal(&public_key, b"hello world", "RSA-OAEP-256")?;
//! println!("{}", envelope.to_json(true)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod files;
pub mod keys;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use common::{Envelope, EnvelopeError, KeyWrapAlgorithm};
pub use envelope::{open, seal, seal_with_rng};
