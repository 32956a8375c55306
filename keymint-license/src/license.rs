//! License issuance and token consumption.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use keymint_keys::{SigningPrivateKey, VerifyingPublicKey};
use keymint_paseto::public;

use crate::error::{LicenseError, LicenseResult};
use crate::payload::{self, LicensePayload, LicenseType, ISSUER};

/// Everything an issuer chooses when creating a license.
///
/// `iat`, `sub`, and `iss` are filled in by [`create_license`].
#[derive(Debug, Clone)]
pub struct LicenseRequest {
    /// The application the license targets (3–100 chars of `[A-Za-z0-9._-]`).
    pub app_id: String,
    /// When the license stops being valid (converted to UTC, truncated to
    /// the minute).
    pub expires_at: DateTime<Utc>,
    /// The license tier (validated and lowercased).
    pub license_type: String,
    /// Application-defined entitlements.
    pub features: Option<Map<String, Value>>,
    /// Issuer-side annotations.
    pub metadata: Option<Map<String, Value>>,
    /// Whether this is a trial license.
    pub trial: bool,
    /// Optional cleartext footer bound into the signature.
    pub footer: Vec<u8>,
}

impl LicenseRequest {
    /// Starts a request with the required fields and no extras.
    #[must_use]
    pub fn new(app_id: &str, expires_at: DateTime<Utc>, license_type: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            expires_at,
            license_type: license_type.to_string(),
            features: None,
            metadata: None,
            trial: false,
            footer: Vec::new(),
        }
    }
}

/// A signed license: the token string plus its decoded payload.
///
/// Immutable once issued. Obtain one from [`create_license`] (issuer side)
/// or [`License::from_token`] (verifier side, signature checked first).
#[derive(Debug, Clone)]
pub struct License {
    token: String,
    payload: LicensePayload,
}

impl License {
    /// Verifies `token` against `key` and returns the carried license.
    ///
    /// Fails closed: any signature, schema, or expiration problem is an
    /// error and no payload data is exposed.
    ///
    /// # Errors
    ///
    /// Token-layer errors for bad signatures or malformed tokens;
    /// [`LicenseError::InvalidPayload`] for schema violations;
    /// [`LicenseError::Expired`] when `now >= exp`.
    pub fn from_token(token: &str, key: &VerifyingPublicKey) -> LicenseResult<Self> {
        let (message, _footer) = public::verify(token, key, None, b"")?;
        let payload: LicensePayload = serde_json::from_slice(&message)
            .map_err(|e| LicenseError::InvalidPayload(e.to_string()))?;
        payload.validate()?;

        if Utc::now() >= payload.exp {
            return Err(LicenseError::Expired {
                expires_at: payload.exp,
            });
        }

        Ok(Self {
            token: token.to_string(),
            payload,
        })
    }

    /// Wraps an existing token and its decoded payload without verifying.
    ///
    /// For holding tokens of unknown provenance; run the `validate_*`
    /// methods before trusting a license built this way.
    #[must_use]
    pub fn from_parts(token: String, payload: LicensePayload) -> Self {
        Self { token, payload }
    }

    /// The canonical signed token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The decoded payload.
    #[must_use]
    pub fn payload(&self) -> &LicensePayload {
        &self.payload
    }

    /// License identifier (`sub`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.payload.sub
    }

    /// The application this license targets.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.payload.app_id
    }

    /// The license tier.
    #[must_use]
    pub fn license_type(&self) -> &LicenseType {
        &self.payload.license_type
    }

    /// Issuance time (UTC, minute precision).
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.payload.iat
    }

    /// Expiration time (UTC, minute precision).
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.payload.exp
    }

    /// Application-defined entitlements, if any.
    #[must_use]
    pub fn features(&self) -> Option<&Map<String, Value>> {
        self.payload.features.as_ref()
    }

    /// Issuer-side annotations, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.payload.metadata.as_ref()
    }

    /// Whether this is a trial license.
    #[must_use]
    pub fn is_trial(&self) -> bool {
        self.payload.trial.unwrap_or(false)
    }
}

/// Issues a new signed license.
///
/// Validates the request fields, stamps `sub` (random UUID), `iat` (now,
/// truncated to the minute), and `iss`, signs the payload, and returns the
/// finished [`License`].
///
/// # Errors
///
/// [`LicenseError::InvalidPayload`] for an out-of-range `app_id` or tier;
/// key-handle errors if `key` has been disposed.
pub fn create_license(key: &SigningPrivateKey, request: LicenseRequest) -> LicenseResult<License> {
    payload::validate_app_id(&request.app_id)?;
    let license_type = LicenseType::new(&request.license_type)?;

    let payload = LicensePayload {
        sub: Uuid::new_v4().to_string(),
        iat: payload::truncate_to_minute(Utc::now()),
        exp: payload::truncate_to_minute(request.expires_at),
        iss: ISSUER.to_string(),
        app_id: request.app_id,
        license_type,
        features: request.features,
        metadata: request.metadata,
        trial: request.trial.then_some(true),
    };

    let message =
        serde_json::to_vec(&payload).map_err(|e| LicenseError::InvalidPayload(e.to_string()))?;
    let token = public::sign(key, &message, &request.footer, b"")?;

    Ok(License { token, payload })
}
