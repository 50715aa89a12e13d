//! Common types, the envelope wire format, and errors shared across `kbs-seal` crates.

pub mod error;
pub mod protocol;

pub use error::EnvelopeError;
pub use protocol::{Envelope, KeyWrapAlgorithm};
