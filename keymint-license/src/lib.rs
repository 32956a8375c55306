//! License issuance and validation for keymint.
//!
//! A license is a signed (`v4.public`) token whose payload carries the
//! fields an application needs to gate functionality:
//!
//! - `sub` — license id (UUID), `iss` — always `"licensify"`
//! - `iat` / `exp` — UTC instants, truncated to the minute at issuance
//! - `app_id` — the target application, `type` — the license tier
//! - optional `features`, `metadata`, and `trial` flag
//!
//! # Design Principles
//!
//! - **Fail closed**: [`License::from_token`] verifies the signature before
//!   reading a single payload field, and rejects expired licenses
//! - **Issue once**: a [`License`] is immutable after creation
//! - **Validation reports, verification errors**: the `validate_*` methods
//!   return an outcome record; constructors return typed errors
//!
//! The crate also exposes symmetric data encryption over encrypted
//! (`v4.local`) tokens for payloads that must stay confidential.

mod data;
mod error;
mod license;
mod payload;
mod validate;

pub use data::{decrypt_data, encrypt_data};
pub use error::{LicenseError, LicenseResult};
pub use license::{create_license, License, LicenseRequest};
pub use payload::{LicensePayload, LicenseType, ISSUER};
pub use validate::ValidationOutcome;

// The key handles callers need to drive this crate.
pub use keymint_keys::{KeyPair, SigningPrivateKey, SymmetricKey, VerifyingPublicKey};

/// Generates a fresh Ed25519 key pair for signing licenses.
#[must_use]
pub fn generate_signing_keys() -> KeyPair {
    KeyPair::generate()
}

/// Generates a fresh symmetric key for encrypted data tokens.
#[must_use]
pub fn generate_encryption_key() -> SymmetricKey {
    SymmetricKey::generate()
}
