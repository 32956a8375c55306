//! Shared test fixtures for the key-serialization suites.

#![allow(dead_code)]

use keymint_keys::{KeyPair, Salt, SymmetricKey};
use keymint_paserk::WrapParams;

/// A deterministic symmetric key.
pub fn test_symmetric_key() -> SymmetricKey {
    SymmetricKey::from_bytes([0x42u8; 32])
}

/// A deterministic key pair.
pub fn test_keypair() -> KeyPair {
    KeyPair::from_seed([0x07u8; 32])
}

/// A fixed salt of 16 bytes.
pub fn test_salt() -> Salt {
    Salt::from_bytes(vec![0x01u8; 16]).unwrap()
}

/// Fast Argon2id costs for tests.
pub fn fast_params() -> WrapParams {
    WrapParams {
        memory_cost: 65_536, // 64 KiB
        time_cost: 2,
        parallelism: 1,
    }
}

/// Flips the last character of a key string's body.
pub fn tamper_last_char(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}
