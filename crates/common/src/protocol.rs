//! The JSON envelope exchanged with the key broker's encrypted resource backend.
//!
//! This shape is a compatibility contract: field names, casing, and encoding
//! must match exactly for the decrypting consumer to accept the envelope.
//!
//! ```text
//! {
//!   "alg": "RSA-OAEP-256",
//!   "enc_key": "<base64>",
//!   "iv": "<base64>",
//!   "ciphertext": "<base64>",
//!   "tag": "<base64>"
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;

// ---------------------------------------------------------------------------
// Key-wrap algorithm
// ---------------------------------------------------------------------------

/// RSA padding scheme used to wrap the content-encryption key.
///
/// The content cipher is always AES-256-GCM and is not encoded in the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyWrapAlgorithm {
    /// RSAES-OAEP with SHA-256 for both the label hash and MGF1, empty label.
    #[default]
    RsaOaep256,
    /// RSAES-PKCS1-v1_5. Legacy, kept for older consumers.
    Rsa1_5,
}

impl KeyWrapAlgorithm {
    /// Every supported algorithm, in preference order.
    pub const ALL: [KeyWrapAlgorithm; 2] =
        [KeyWrapAlgorithm::RsaOaep256, KeyWrapAlgorithm::Rsa1_5];

    /// The wire tag carried in the envelope's `alg` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyWrapAlgorithm::RsaOaep256 => "RSA-OAEP-256",
            KeyWrapAlgorithm::Rsa1_5 => "RSA1_5",
        }
    }
}

impl fmt::Display for KeyWrapAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyWrapAlgorithm {
    type Err = EnvelopeError;

    /// Exact, case-sensitive match against the wire tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyWrapAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| EnvelopeError::UnsupportedAlgorithm(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A sealed resource.
///
/// All binary fields are standard Base64 (RFC 4648 §4, padded). `alg` is kept
/// as the raw string so that an envelope naming an unknown algorithm still
/// parses and is rejected as [`EnvelopeError::UnsupportedAlgorithm`] rather
/// than as malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Key-wrap algorithm: `RSA-OAEP-256` or `RSA1_5`.
    pub alg: String,
    /// Content-encryption key, encrypted to the recipient's RSA public key.
    pub enc_key: String,
    /// AES-GCM nonce.
    pub iv: String,
    /// AES-GCM ciphertext without the authentication tag.
    pub ciphertext: String,
    /// AES-GCM authentication tag.
    pub tag: String,
}

impl Envelope {
    /// Parse the `alg` field.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::UnsupportedAlgorithm`] for any unknown tag.
    pub fn algorithm(&self) -> Result<KeyWrapAlgorithm, EnvelopeError> {
        self.alg.parse()
    }

    /// Parse an envelope from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidEnvelope`] if the bytes are not a JSON
    /// object carrying all five string fields.
    pub fn from_slice(data: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(data).map_err(|e| EnvelopeError::InvalidEnvelope(e.to_string()))
    }

    /// Serialise to JSON. `pretty` selects two-space indentation.
    pub fn to_json(&self, pretty: bool) -> Result<String, EnvelopeError> {
        let out = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        out.map_err(|e| EnvelopeError::InvalidEnvelope(e.to_string()))
    }
}
