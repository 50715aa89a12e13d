//! Cryptographic primitives behind the envelope.
//!
//! This module is intentionally free of file and CLI concerns.
//!
//! - [`cipher`]: AES-256-GCM over the resource payload, tag carried detached.
//! - [`keywrap`]: RSA encryption of the content-encryption key.

pub mod cipher;
pub mod keywrap;

pub use cipher::{KEY_LEN, NONCE_LEN, TAG_LEN};
