//! Common error types shared across crates.

use thiserror::Error;

/// Top-level error type for envelope construction and consumption.
///
/// Every failure is returned to the immediate caller. Nothing is retried and no
/// partial envelope or partial plaintext is ever produced.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The supplied key material does not parse or is not an RSA public key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The supplied key material does not parse or is not an RSA private key.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The `alg` tag is outside the supported key-wrap set.
    #[error("unsupported alg: {0}")]
    UnsupportedAlgorithm(String),

    /// AEAD sealing/opening or RSA key wrapping/unwrapping failed.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// The envelope is not valid JSON, a field is not Base64, or a decoded
    /// field has the wrong length.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// Reading plaintext or key material, or writing the envelope, failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnvelopeError {
    /// Short machine-readable code for this error, suitable for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            EnvelopeError::InvalidPublicKey(_) => "invalid_public_key",
            EnvelopeError::InvalidPrivateKey(_) => "invalid_private_key",
            EnvelopeError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            EnvelopeError::Crypto(_) => "crypto_error",
            EnvelopeError::InvalidEnvelope(_) => "invalid_envelope",
            EnvelopeError::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(
            EnvelopeError::InvalidPublicKey("x".into()).code(),
            "invalid_public_key"
        );
        assert_eq!(
            EnvelopeError::UnsupportedAlgorithm("x".into()).code(),
            "unsupported_algorithm"
        );
        assert_eq!(EnvelopeError::Crypto("x".into()).code(), "crypto_error");
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(EnvelopeError::from(io).code(), "io_error");
    }

    #[test]
    fn display_includes_message() {
        let e = EnvelopeError::UnsupportedAlgorithm("AES-GCM".into());
        assert_eq!(e.to_string(), "unsupported alg: AES-GCM");
    }
}
