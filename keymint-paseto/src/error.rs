//! Error types for the token engine.

use keymint_keys::KeyError;
use thiserror::Error;

/// Result type for token operations.
pub type PasetoResult<T> = Result<T, PasetoError>;

/// Errors raised while composing or consuming tokens.
///
/// The cryptographic failures ([`PasetoError::SignatureInvalid`],
/// [`PasetoError::AuthFailed`]) deliberately carry no detail: callers must
/// not be able to distinguish a bad MAC from a bad ciphertext.
#[derive(Debug, Error)]
pub enum PasetoError {
    /// The token does not start with a supported `v4` header.
    #[error("unsupported token header: {found:?}")]
    BadVersion {
        /// The header section actually present.
        found: String,
    },

    /// A token section was not valid unpadded url-safe base64.
    #[error("malformed token encoding: {0}")]
    BadEncoding(String),

    /// The decoded body is shorter than the fixed fields it must contain.
    #[error("token body truncated")]
    Truncated,

    /// Ed25519 signature verification failed.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// MAC verification or decryption failed.
    #[error("token authentication failed")]
    AuthFailed,

    /// The caller pinned a footer that differs from the token's.
    #[error("token footer does not match the expected footer")]
    FooterMismatch,

    /// A key handle rejected the operation.
    #[error(transparent)]
    Key(#[from] KeyError),
}
