//! Shared test fixtures for the token suites.

#![allow(dead_code)]

use keymint_keys::{KeyPair, SymmetricKey};

/// A deterministic key pair from a fixed seed.
pub fn test_keypair() -> KeyPair {
    KeyPair::from_seed([
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ])
}

/// A deterministic symmetric key.
pub fn test_symmetric_key() -> SymmetricKey {
    SymmetricKey::from_bytes([0x42u8; 32])
}

/// Flips the last character of a token's body section.
pub fn tamper_last_char(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}
