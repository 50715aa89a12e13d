//! Envelope construction ([`seal`]) and consumption ([`open`]).
//!
//! # Construction
//!
//! 1. Parse `alg`. Unknown tags fail here, before any randomness is drawn.
//! 2. Draw a 32-byte CEK and a 12-byte IV.
//! 3. AES-256-GCM seal the plaintext (no AAD) and split off the 16-byte tag.
//! 4. RSA-wrap the CEK with the padding selected by `alg`.
//! 5. Base64 (standard, padded) every binary field.
//!
//! # Security invariants
//!
//! - The CEK lives only in a zeroizing buffer for the duration of one call.
//! - Neither the CEK nor any plaintext appears in log fields.
//! - Construction is all-or-nothing: an error never yields a partial envelope.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{Envelope, EnvelopeError, KeyWrapAlgorithm};
use rsa::rand_core::{CryptoRngCore, OsRng};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{cipher, keywrap, KEY_LEN, NONCE_LEN, TAG_LEN};

/// Seal `plaintext` for the holder of `public_key`'s private half, drawing
/// randomness from the operating system.
///
/// # Errors
///
/// - [`EnvelopeError::UnsupportedAlgorithm`] if `alg` is not `RSA-OAEP-256`
///   or `RSA1_5`.
/// - [`EnvelopeError::Crypto`] if AEAD sealing or RSA wrapping fails.
pub fn seal(
    public_key: &RsaPublicKey,
    plaintext: &[u8],
    alg: &str,
) -> Result<Envelope, EnvelopeError> {
    seal_with_rng(&mut OsRng, public_key, plaintext, alg)
}

/// [`seal`] with an explicit randomness source.
pub fn seal_with_rng<R: CryptoRngCore>(
    rng: &mut R,
    public_key: &RsaPublicKey,
    plaintext: &[u8],
    alg: &str,
) -> Result<Envelope, EnvelopeError> {
    let alg: KeyWrapAlgorithm = alg.parse()?;
    debug!(alg = %alg, plaintext_len = plaintext.len(), "sealing resource");

    let cek = cipher::generate_key(rng);
    let iv = cipher::generate_nonce(rng);

    let sealed = cipher::seal(&cek[..], &iv, plaintext).map_err(seal_failed)?;
    let enc_key = keywrap::wrap_key(rng, public_key, alg, &cek[..])?;

    Ok(Envelope {
        alg: alg.as_str().to_owned(),
        enc_key: STANDARD.encode(enc_key),
        iv: STANDARD.encode(iv),
        ciphertext: STANDARD.encode(&sealed.ciphertext),
        tag: STANDARD.encode(sealed.tag),
    })
}

/// Recover the plaintext from `envelope` with the recipient's private key.
///
/// Mirrors the key broker's encrypted resource backend, and is what
/// `kbs-seal decrypt` uses to verify an envelope before it is deployed.
///
/// # Errors
///
/// - [`EnvelopeError::UnsupportedAlgorithm`] for an unknown `alg`.
/// - [`EnvelopeError::InvalidEnvelope`] if a field is not Base64 or decodes
///   to the wrong length (CEK 32, IV 12, tag 16 bytes).
/// - [`EnvelopeError::Crypto`] if the CEK cannot be unwrapped or the payload
///   fails authentication.
pub fn open(private_key: &RsaPrivateKey, envelope: &Envelope) -> Result<Vec<u8>, EnvelopeError> {
    let alg = envelope.algorithm()?;
    debug!(alg = %alg, "opening envelope");

    let enc_key = decode_field("enc_key", &envelope.enc_key)?;
    let cek = Zeroizing::new(keywrap::unwrap_key(private_key, alg, &enc_key)?);

    let iv = decode_field("iv", &envelope.iv)?;
    let ciphertext = decode_field("ciphertext", &envelope.ciphertext)?;
    let tag = decode_field("tag", &envelope.tag)?;

    ensure_len("CEK", cek.len(), KEY_LEN)?;
    ensure_len("GCM tag", tag.len(), TAG_LEN)?;
    ensure_len("GCM nonce", iv.len(), NONCE_LEN)?;

    Ok(cipher::open(&cek, &iv, &ciphertext, &tag)?)
}

/// Decode one Base64 field, naming it in the error.
fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, EnvelopeError> {
    STANDARD
        .decode(value)
        .map_err(|e| EnvelopeError::InvalidEnvelope(format!("base64 decode `{name}`: {e}")))
}

fn ensure_len(what: &str, got: usize, expected: usize) -> Result<(), EnvelopeError> {
    if got != expected {
        return Err(EnvelopeError::InvalidEnvelope(format!(
            "unexpected {what} length {got}, expect {expected} bytes"
        )));
    }
    Ok(())
}

/// Every cipher failure while sealing is a crypto error; there is no envelope
/// input to blame.
fn seal_failed(e: cipher::CipherError) -> EnvelopeError {
    EnvelopeError::Crypto(format!("AES-256-GCM seal: {e}"))
}

/// Opening: length errors describe the envelope, authentication failures are
/// crypto errors.
impl From<cipher::CipherError> for EnvelopeError {
    fn from(e: cipher::CipherError) -> Self {
        match e {
            cipher::CipherError::AeadFailure => {
                EnvelopeError::Crypto(format!("AES-256-GCM: {e}"))
            }
            other => EnvelopeError::InvalidEnvelope(other.to_string()),
        }
    }
}

impl From<keywrap::KeyWrapError> for EnvelopeError {
    fn from(e: keywrap::KeyWrapError) -> Self {
        EnvelopeError::Crypto(e.to_string())
    }
}
