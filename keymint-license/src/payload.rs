//! The license payload schema and its field validation rules.

use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{LicenseError, LicenseResult};

/// Issuer written into every license this crate creates.
pub const ISSUER: &str = "licensify";

/// Bounds for `app_id`.
const APP_ID_LEN: std::ops::RangeInclusive<usize> = 3..=100;

/// Bounds for the license tier string.
const TYPE_LEN: std::ops::RangeInclusive<usize> = 2..=100;

/// A validated, lowercased license tier such as `pro` or `enterprise@v2`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseType(String);

impl LicenseType {
    /// Validates and lowercases a tier string.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidPayload`] when the string is out of the
    /// 2–100 range or contains characters outside `[A-Za-z0-9._@-]`.
    pub fn new(s: &str) -> LicenseResult<Self> {
        if !TYPE_LEN.contains(&s.len()) {
            return Err(LicenseError::InvalidPayload(format!(
                "license type must be {}-{} characters, got {}",
                TYPE_LEN.start(),
                TYPE_LEN.end(),
                s.len()
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
        {
            return Err(LicenseError::InvalidPayload(
                "license type may only contain [A-Za-z0-9._@-]".to_string(),
            ));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the tier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LicenseType {
    type Error = LicenseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<LicenseType> for String {
    fn from(t: LicenseType) -> Self {
        t.0
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LicenseType({})", self.0)
    }
}

/// The decoded license payload.
///
/// Field names match the token JSON exactly; `type` is renamed because it
/// is a Rust keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicensePayload {
    /// License identifier (UUID).
    pub sub: String,
    /// Issuance time, UTC, minute precision.
    pub iat: DateTime<Utc>,
    /// Expiration time, UTC, minute precision.
    pub exp: DateTime<Utc>,
    /// Issuer name.
    pub iss: String,
    /// The application this license targets.
    pub app_id: String,
    /// The license tier.
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    /// Application-defined entitlements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Map<String, Value>>,
    /// Issuer-side annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Present and true for trial licenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial: Option<bool>,
}

impl LicensePayload {
    /// Checks the schema rules that serde cannot express.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidPayload`] naming the offending field.
    pub fn validate(&self) -> LicenseResult<()> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| LicenseError::InvalidPayload("sub is not a UUID".to_string()))?;
        if self.iss.is_empty() {
            return Err(LicenseError::InvalidPayload("iss is empty".to_string()));
        }
        validate_app_id(&self.app_id)?;
        Ok(())
    }
}

/// Validates an application identifier.
///
/// # Errors
///
/// [`LicenseError::InvalidPayload`] when the string is out of the 3–100
/// range or contains characters outside `[A-Za-z0-9._-]`.
pub fn validate_app_id(app_id: &str) -> LicenseResult<()> {
    if !APP_ID_LEN.contains(&app_id.len()) {
        return Err(LicenseError::InvalidPayload(format!(
            "app_id must be {}-{} characters, got {}",
            APP_ID_LEN.start(),
            APP_ID_LEN.end(),
            app_id.len()
        )));
    }
    if !app_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(LicenseError::InvalidPayload(
            "app_id may only contain [A-Za-z0-9._-]".to_string(),
        ));
    }
    Ok(())
}

/// Drops seconds and subseconds; issuance times carry minute precision.
pub(crate) fn truncate_to_minute(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .expect("zeroed seconds are always representable")
}
