//! Salt generation for password-based key derivation.

use rand::RngCore;

use crate::error::{KeyError, KeyResult};

/// Minimum salt length in bytes accepted anywhere in the workspace.
pub const MIN_SALT_SIZE: usize = 16;

/// Random bytes fed to Argon2id alongside a password.
///
/// Salts are not secret; they travel in the clear inside wrapped-key
/// envelopes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt {
    bytes: Vec<u8>,
}

impl Salt {
    /// Generates a random salt of the default length.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with_len(MIN_SALT_SIZE).expect("default length meets the minimum")
    }

    /// Generates a random salt of `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::SaltTooShort`] when `len < MIN_SALT_SIZE`.
    pub fn generate_with_len(len: usize) -> KeyResult<Self> {
        if len < MIN_SALT_SIZE {
            return Err(KeyError::SaltTooShort {
                minimum: MIN_SALT_SIZE,
                actual: len,
            });
        }
        let mut bytes = vec![0u8; len];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Ok(Self { bytes })
    }

    /// Creates a salt from caller-supplied bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::SaltTooShort`] when fewer than
    /// [`MIN_SALT_SIZE`] bytes are given.
    pub fn from_bytes(bytes: Vec<u8>) -> KeyResult<Self> {
        if bytes.len() < MIN_SALT_SIZE {
            return Err(KeyError::SaltTooShort {
                minimum: MIN_SALT_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Returns the salt bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the salt length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; salts cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length() {
        assert_eq!(Salt::generate().len(), MIN_SALT_SIZE);
    }

    #[test]
    fn short_salt_rejected() {
        assert!(Salt::generate_with_len(8).is_err());
        assert!(Salt::from_bytes(vec![0u8; 15]).is_err());
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(Salt::generate(), Salt::generate());
    }
}
