//! Error types for key handles.

use crate::secret::KeyType;
use thiserror::Error;

/// Result type for key-handle operations.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors raised by key handles.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The handle was disposed and its buffer zeroed.
    #[error("key handle has been disposed")]
    Disposed,

    /// A handle of the wrong type was passed to an operation.
    #[error("key type mismatch: expected {expected}, got {actual}")]
    KeyTypeMismatch {
        /// The type the operation requires.
        expected: KeyType,
        /// The type that was supplied.
        actual: KeyType,
    },

    /// Raw bytes had the wrong length for the requested key.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Bytes did not decode to a valid Ed25519 public point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Salt shorter than the minimum allowed.
    #[error("salt too short: minimum {minimum} bytes, got {actual}")]
    SaltTooShort { minimum: usize, actual: usize },
}
