//! RSA wrapping of the content-encryption key.
//!
//! The padding scheme is selected solely by [`KeyWrapAlgorithm`]; there is no
//! negotiation or fallback between the two.

use common::KeyWrapAlgorithm;
use rsa::rand_core::CryptoRngCore;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use thiserror::Error;

/// Errors produced by the key-wrap layer.
#[derive(Debug, Error)]
pub enum KeyWrapError {
    /// RSA encryption of the CEK failed (e.g. the modulus is too small for
    /// the padding overhead).
    #[error("{alg} encrypt content encryption key: {source}")]
    Wrap {
        alg: KeyWrapAlgorithm,
        #[source]
        source: rsa::Error,
    },

    /// RSA decryption of the wrapped CEK failed.
    #[error("{alg} decrypt content encryption key: {source}")]
    Unwrap {
        alg: KeyWrapAlgorithm,
        #[source]
        source: rsa::Error,
    },
}

/// Encrypt `cek` to `public_key` with the padding named by `alg`.
///
/// - `RSA-OAEP-256`: OAEP with SHA-256 as both the padding hash and the MGF1
///   hash, empty label.
/// - `RSA1_5`: PKCS#1 v1.5 encryption padding.
pub fn wrap_key<R: CryptoRngCore>(
    rng: &mut R,
    public_key: &RsaPublicKey,
    alg: KeyWrapAlgorithm,
    cek: &[u8],
) -> Result<Vec<u8>, KeyWrapError> {
    let wrapped = match alg {
        KeyWrapAlgorithm::RsaOaep256 => public_key.encrypt(rng, Oaep::new::<Sha256>(), cek),
        KeyWrapAlgorithm::Rsa1_5 => public_key.encrypt(rng, Pkcs1v15Encrypt, cek),
    };
    wrapped.map_err(|source| KeyWrapError::Wrap { alg, source })
}

/// Recover the CEK from `enc_key` with `private_key`.
///
/// The result is not length-checked here; callers validate it against the
/// content cipher's key size.
pub fn unwrap_key(
    private_key: &RsaPrivateKey,
    alg: KeyWrapAlgorithm,
    enc_key: &[u8],
) -> Result<Vec<u8>, KeyWrapError> {
    let cek = match alg {
        KeyWrapAlgorithm::RsaOaep256 => private_key.decrypt(Oaep::new::<Sha256>(), enc_key),
        KeyWrapAlgorithm::Rsa1_5 => private_key.decrypt(Pkcs1v15Encrypt, enc_key),
    };
    cek.map_err(|source| KeyWrapError::Unwrap { alg, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{other_private_key, test_private_key};
    use rsa::rand_core::OsRng;
    use rsa::traits::PublicKeyParts;

    const CEK: [u8; 32] = [0x5Au8; 32];

    #[test]
    fn wrap_unwrap_round_trip_both_algs() {
        let sk = test_private_key();
        let pk = sk.to_public_key();
        for alg in KeyWrapAlgorithm::ALL {
            let wrapped = wrap_key(&mut OsRng, &pk, alg, &CEK).unwrap();
            assert_eq!(wrapped.len(), pk.size(), "{alg}: one modulus-sized block");
            assert_eq!(unwrap_key(sk, alg, &wrapped).unwrap(), CEK);
        }
    }

    #[test]
    fn wrapping_is_randomised() {
        let pk = test_private_key().to_public_key();
        for alg in KeyWrapAlgorithm::ALL {
            let a = wrap_key(&mut OsRng, &pk, alg, &CEK).unwrap();
            let b = wrap_key(&mut OsRng, &pk, alg, &CEK).unwrap();
            assert_ne!(a, b, "{alg} padding must be randomised");
        }
    }

    #[test]
    fn oaep_uses_sha256_for_label_and_mgf() {
        let sk = test_private_key();
        let wrapped = wrap_key(
            &mut OsRng,
            &sk.to_public_key(),
            KeyWrapAlgorithm::RsaOaep256,
            &CEK,
        )
        .unwrap();
        let explicit = Oaep::new_with_mgf_hash::<Sha256, Sha256>();
        assert_eq!(sk.decrypt(explicit, &wrapped).unwrap(), CEK);
    }

    #[test]
    fn oaep_wrapped_key_does_not_unwrap_as_pkcs1() {
        let sk = test_private_key();
        let wrapped = wrap_key(
            &mut OsRng,
            &sk.to_public_key(),
            KeyWrapAlgorithm::RsaOaep256,
            &CEK,
        )
        .unwrap();
        match unwrap_key(sk, KeyWrapAlgorithm::Rsa1_5, &wrapped) {
            Ok(cek) => assert_ne!(cek, CEK),
            Err(e) => assert!(matches!(e, KeyWrapError::Unwrap { .. })),
        }
    }

    #[test]
    fn wrong_private_key_fails() {
        let pk = test_private_key().to_public_key();
        let wrapped = wrap_key(&mut OsRng, &pk, KeyWrapAlgorithm::RsaOaep256, &CEK).unwrap();
        assert!(unwrap_key(other_private_key(), KeyWrapAlgorithm::RsaOaep256, &wrapped).is_err());
    }

    #[test]
    fn error_names_algorithm() {
        let sk = test_private_key();
        let err = unwrap_key(sk, KeyWrapAlgorithm::RsaOaep256, b"short").unwrap_err();
        assert!(err.to_string().starts_with("RSA-OAEP-256 decrypt"));
    }
}
