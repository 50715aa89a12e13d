//! Structured logging for `kbs-seal`.
//!
//! # Telemetry invariants
//!
//! - **No key material or plaintext** may appear in any log field. Events
//!   carry algorithm tags, lengths, and paths only.
//! - Log level is configurable via `KBS_SEAL_LOG_LEVEL` (default: `warn`);
//!   `RUST_LOG` overrides it.

pub mod init;

pub use init::init_telemetry;
