//! AES-256-GCM sealing and opening of resource payloads.
//!
//! **Framing:** the combined AEAD output is `ciphertext || tag`. The envelope
//! carries the two halves separately, so [`seal`] splits at `len - TAG_LEN`
//! and [`open`] verifies a detached tag.
//!
//! **Nonces:** every CEK is generated fresh and used for exactly one message,
//! so a random 96-bit nonce per call never repeats under the same key.

use aes_gcm::{
    aead::{generic_array::GenericArray, rand_core::CryptoRngCore, Aead, AeadInPlace, KeyInit},
    Aes256Gcm, Nonce,
};
use thiserror::Error;
use zeroize::Zeroizing;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Output of [`seal`] with the authentication tag split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    /// Ciphertext bytes; same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Trailing authentication tag.
    pub tag: [u8; TAG_LEN],
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The CEK is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid CEK length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The nonce is the wrong length (must be [`NONCE_LEN`] bytes).
    #[error("invalid nonce length: expected {NONCE_LEN} bytes, got {0}")]
    InvalidNonceLength(usize),

    /// The tag is the wrong length (must be [`TAG_LEN`] bytes).
    #[error("invalid tag length: expected {TAG_LEN} bytes, got {0}")]
    InvalidTagLength(usize),

    /// AES-GCM encryption failed or decryption did not authenticate.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Draw a fresh content-encryption key from `rng`.
///
/// The key is wiped from memory when the returned buffer is dropped.
pub fn generate_key<R: CryptoRngCore>(rng: &mut R) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    rng.fill_bytes(&mut key[..]);
    key
}

/// Draw a fresh nonce from `rng`.
pub fn generate_nonce<R: CryptoRngCore>(rng: &mut R) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt `plaintext` under `cek` and `nonce` with empty associated data.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `cek` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (only reachable
/// for plaintexts beyond the GCM length limit).
pub fn seal(
    cek: &[u8],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<SealedPayload, CipherError> {
    let cipher = build_cipher(cek)?;

    let mut combined = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    let split_at = combined
        .len()
        .checked_sub(TAG_LEN)
        .ok_or(CipherError::InvalidTagLength(combined.len()))?;
    let tail = combined.split_off(split_at);

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&tail);

    Ok(SealedPayload {
        ciphertext: combined,
        tag,
    })
}

/// Decrypt `ciphertext` and verify the detached `tag`.
///
/// # Errors
///
/// Returns a length error if `cek`, `nonce`, or `tag` has the wrong size.
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key,
/// wrong nonce, or tampered ciphertext/tag). No plaintext is released in
/// that case.
pub fn open(
    cek: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(cek)?;
    if nonce.len() != NONCE_LEN {
        return Err(CipherError::InvalidNonceLength(nonce.len()));
    }
    if tag.len() != TAG_LEN {
        return Err(CipherError::InvalidTagLength(tag.len()));
    }

    let mut buf = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buf,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| CipherError::AeadFailure)?;
    Ok(buf)
}

fn build_cipher(cek: &[u8]) -> Result<Aes256Gcm, CipherError> {
    if cek.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(cek.len()));
    }
    Aes256Gcm::new_from_slice(cek).map_err(|_| CipherError::InvalidKeyLength(cek.len()))
}
