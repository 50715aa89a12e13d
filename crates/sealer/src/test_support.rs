//! Shared fixtures for unit tests.

use std::sync::OnceLock;

use rsa::rand_core::{CryptoRng, Error as RngError, OsRng, RngCore};
use rsa::RsaPrivateKey;

use crate::keys::load_private_key;

const TEST_KEY_PEM: &str = include_str!("../testdata/rsa2048.pem");
const OTHER_KEY_PEM: &str = include_str!("../testdata/other2048.pem");

/// The 2048-bit recipient key pair used across tests.
pub fn test_private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| load_private_key(TEST_KEY_PEM.as_bytes()).unwrap())
}

/// An unrelated 2048-bit key pair.
pub fn other_private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| load_private_key(OTHER_KEY_PEM.as_bytes()).unwrap())
}

/// OS randomness that counts how many times it was drawn from.
#[derive(Debug, Default)]
pub struct CountingRng {
    pub draws: usize,
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws += 1;
        OsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        self.draws += 1;
        OsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for CountingRng {}
