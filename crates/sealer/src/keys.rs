//! RSA key loading.
//!
//! Public keys are accepted as SubjectPublicKeyInfo or PKCS#1, in either PEM
//! or DER. Private keys are accepted as PKCS#8 or PKCS#1, matching the formats
//! the key broker's encrypted resource backend loads.

use std::fs;
use std::path::Path;

use common::EnvelopeError;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

const PEM_PREAMBLE: &str = "-----BEGIN";

/// Parse an RSA public key from PEM or DER bytes.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidPublicKey`] if the bytes are neither an
/// SPKI nor a PKCS#1 RSA public key. A well-formed SPKI for another key type
/// (EC, Ed25519) is rejected here too.
pub fn load_public_key(data: &[u8]) -> Result<RsaPublicKey, EnvelopeError> {
    match as_pem(data) {
        Some(pem) => RsaPublicKey::from_public_key_pem(pem).or_else(|spki| {
            RsaPublicKey::from_pkcs1_pem(pem).map_err(|pkcs1| {
                EnvelopeError::InvalidPublicKey(format!(
                    "public key must be RSA (SPKI: {spki}; PKCS#1: {pkcs1})"
                ))
            })
        }),
        None => RsaPublicKey::from_public_key_der(data).or_else(|spki| {
            RsaPublicKey::from_pkcs1_der(data).map_err(|pkcs1| {
                EnvelopeError::InvalidPublicKey(format!(
                    "public key must be RSA (SPKI: {spki}; PKCS#1: {pkcs1})"
                ))
            })
        }),
    }
}

/// Parse an RSA private key from PEM or DER bytes.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidPrivateKey`] if the bytes are neither a
/// PKCS#8 nor a PKCS#1 RSA private key.
pub fn load_private_key(data: &[u8]) -> Result<RsaPrivateKey, EnvelopeError> {
    match as_pem(data) {
        Some(pem) => RsaPrivateKey::from_pkcs8_pem(pem).or_else(|pkcs8| {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|pkcs1| {
                EnvelopeError::InvalidPrivateKey(format!(
                    "private key must be RSA (PKCS#8: {pkcs8}; PKCS#1: {pkcs1})"
                ))
            })
        }),
        None => RsaPrivateKey::from_pkcs8_der(data).or_else(|pkcs8| {
            RsaPrivateKey::from_pkcs1_der(data).map_err(|pkcs1| {
                EnvelopeError::InvalidPrivateKey(format!(
                    "private key must be RSA (PKCS#8: {pkcs8}; PKCS#1: {pkcs1})"
                ))
            })
        }),
    }
}

/// Read and parse an RSA public key file.
///
/// # Errors
///
/// Returns [`EnvelopeError::Io`] if the file cannot be read, otherwise as
/// [`load_public_key`].
pub fn read_public_key(path: &Path) -> Result<RsaPublicKey, EnvelopeError> {
    let data = fs::read(path)?;
    let key = load_public_key(&data)?;
    debug!(path = %path.display(), "loaded RSA public key");
    Ok(key)
}

/// Read and parse an RSA private key file.
///
/// # Errors
///
/// Returns [`EnvelopeError::Io`] if the file cannot be read, otherwise as
/// [`load_private_key`].
pub fn read_private_key(path: &Path) -> Result<RsaPrivateKey, EnvelopeError> {
    let data = fs::read(path)?;
    let key = load_private_key(&data)?;
    debug!(path = %path.display(), "loaded RSA private key");
    Ok(key)
}

/// Returns the input as text if it looks like PEM.
fn as_pem(data: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(data).ok()?;
    text.trim_start().starts_with(PEM_PREAMBLE).then_some(text)
}
