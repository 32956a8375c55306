//! Validation outcomes: reports instead of errors.
//!
//! Verifier UIs usually want "is it good, and why not" rather than an error
//! to catch, so these methods collapse the error taxonomy into an outcome
//! record. The messages for cryptographic failures stay generic.

use chrono::Utc;

use keymint_keys::VerifyingPublicKey;
use keymint_paseto::public;

use crate::license::License;

/// The result of a validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the check passed.
    pub is_valid: bool,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationOutcome {
    fn valid(message: &str) -> Self {
        Self {
            is_valid: true,
            message: message.to_string(),
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            is_valid: false,
            message,
        }
    }
}

impl License {
    /// Re-verifies the token signature against `key`.
    ///
    /// Expiration is not consulted: an expired license with an intact
    /// signature reports valid here.
    #[must_use]
    pub fn validate_signature(&self, key: &VerifyingPublicKey) -> ValidationOutcome {
        match public::verify(self.token(), key, None, b"") {
            Ok(_) => ValidationOutcome::valid("signature verified"),
            Err(e) => ValidationOutcome::invalid(e.to_string()),
        }
    }

    /// Checks the expiration against the current UTC time.
    ///
    /// `now == exp` counts as expired.
    #[must_use]
    pub fn validate_expiration(&self) -> ValidationOutcome {
        let exp = self.expires_at();
        if Utc::now() >= exp {
            ValidationOutcome::invalid(format!("license expired on {exp}"))
        } else {
            ValidationOutcome::valid("license is active")
        }
    }

    /// Signature first, then expiration; the first failure wins.
    #[must_use]
    pub fn validate(&self, key: &VerifyingPublicKey) -> ValidationOutcome {
        let signature = self.validate_signature(key);
        if !signature.is_valid {
            return signature;
        }
        self.validate_expiration()
    }
}
