//! Error types for key serialization and wrapping.

use keymint_keys::KeyError;
use thiserror::Error;

/// Result type for key serialization and wrapping.
pub type PaserkResult<T> = Result<T, PaserkError>;

/// Errors raised while encoding, decoding, wrapping, or unwrapping keys.
///
/// [`PaserkError::BadPassword`] and [`PaserkError::AuthFailed`] carry no
/// detail: a caller must not learn whether a tag check or a decryption
/// failed.
#[derive(Debug, Error)]
pub enum PaserkError {
    /// The string does not carry the expected format prefix.
    #[error("key string does not start with {expected:?}")]
    WrongPrefix {
        /// The prefix the operation requires.
        expected: &'static str,
    },

    /// The body was not valid unpadded url-safe base64, or not ASCII.
    #[error("malformed key encoding: {0}")]
    BadEncoding(String),

    /// The decoded body is shorter than its fixed layout.
    #[error("key body truncated")]
    Truncated,

    /// Derivation costs are out of range.
    #[error("invalid derivation parameters: {0}")]
    BadParameters(String),

    /// The password-wrap tag did not verify.
    #[error("incorrect password or corrupted key wrapping")]
    BadPassword,

    /// A wrap or seal tag did not verify.
    #[error("key authentication failed")]
    AuthFailed,

    /// A key handle rejected the operation.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A blocking task could not be joined.
    #[cfg(feature = "rt")]
    #[error("background task failed: {0}")]
    Runtime(String),
}
