//! Error types for license operations.

use chrono::{DateTime, Utc};
use keymint_keys::KeyError;
use keymint_paseto::PasetoError;
use thiserror::Error;

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Errors raised while issuing or consuming licenses.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The payload is missing required fields or violates the schema.
    #[error("invalid license payload: {0}")]
    InvalidPayload(String),

    /// The license expiration has passed.
    #[error("license expired on {expires_at}")]
    Expired {
        /// When the license stopped being valid.
        expires_at: DateTime<Utc>,
    },

    /// The token layer rejected the operation.
    #[error(transparent)]
    Token(#[from] PasetoError),

    /// A key handle rejected the operation.
    #[error(transparent)]
    Key(#[from] KeyError),
}
