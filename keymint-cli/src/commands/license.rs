//! `keymint license` — create, verify, encrypt, and decrypt licenses.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::{json, Map, Value};
use tracing::debug;

use keymint_license::{
    create_license, decrypt_data, encrypt_data, License, LicenseError, LicenseRequest,
};
use keymint_paserk::plain;

use crate::io::{emit, read_input};

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Issue a signed license from a JSON request
    Create {
        /// Signing key as a k4.secret string
        #[arg(long)]
        key: String,

        /// JSON request file, or - for stdin
        #[arg(long)]
        request: String,

        /// Cleartext footer bound into the signature
        #[arg(long)]
        footer: Option<String>,
    },
    /// Verify a signed license token
    Verify {
        /// Verifying key as a k4.public string
        #[arg(long)]
        key: String,

        /// The v4.public token to verify
        #[arg(long)]
        token: String,
    },
    /// Encrypt a JSON object into a data token
    Encrypt {
        /// Symmetric key as a k4.local string
        #[arg(long)]
        key: String,

        /// JSON data file, or - for stdin
        #[arg(long)]
        data: String,

        /// Cleartext footer bound into the token
        #[arg(long)]
        footer: Option<String>,
    },
    /// Decrypt a data token back into JSON
    Decrypt {
        /// Symmetric key as a k4.local string
        #[arg(long)]
        key: String,

        /// The v4.local token to decrypt
        #[arg(long)]
        token: String,
    },
}

pub fn run(cmd: Cmd) -> Result<u8> {
    match cmd {
        Cmd::Create {
            key,
            request,
            footer,
        } => create(&key, &request, footer.as_deref()),
        Cmd::Verify { key, token } => verify(&key, &token),
        Cmd::Encrypt { key, data, footer } => encrypt(&key, &data, footer.as_deref()),
        Cmd::Decrypt { key, token } => decrypt(&key, &token),
    }
}

fn create(key: &str, request_path: &str, footer: Option<&str>) -> Result<u8> {
    let pair = plain::decode_secret(key).context("parsing --key (expected k4.secret)")?;
    let request = parse_request(&read_input(request_path)?, footer)?;
    debug!(app_id = %request.app_id, "issuing license");

    let license = create_license(pair.signing(), request)?;
    emit(&json!({
        "token": license.token(),
        "license": license.payload(),
    }))?;
    Ok(0)
}

fn verify(key: &str, token: &str) -> Result<u8> {
    let public = plain::decode_public(key).context("parsing --key (expected k4.public)")?;
    match License::from_token(token, &public) {
        Ok(license) => {
            emit(&json!({
                "is_valid": true,
                "license": license.payload(),
            }))?;
            Ok(0)
        }
        Err(e @ (LicenseError::Expired { .. }
        | LicenseError::Token(_)
        | LicenseError::InvalidPayload(_))) => {
            emit(&json!({
                "is_valid": false,
                "message": e.to_string(),
            }))?;
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn encrypt(key: &str, data_path: &str, footer: Option<&str>) -> Result<u8> {
    let key = plain::decode_local(key).context("parsing --key (expected k4.local)")?;
    let data: Value = serde_json::from_str(&read_input(data_path)?).context("parsing data JSON")?;
    let Value::Object(map) = data else {
        bail!("data must be a JSON object");
    };

    let token = encrypt_data(&map, &key, footer.unwrap_or_default().as_bytes())?;
    emit(&json!({ "token": token }))?;
    Ok(0)
}

fn decrypt(key: &str, token: &str) -> Result<u8> {
    let key = plain::decode_local(key).context("parsing --key (expected k4.local)")?;
    let (data, footer) = decrypt_data(token, &key)?;

    let mut out = json!({ "data": data });
    if !footer.is_empty() {
        out["footer"] = json!(String::from_utf8_lossy(&footer));
    }
    emit(&out)?;
    Ok(0)
}

/// Parses the issuance request JSON into a [`LicenseRequest`].
///
/// Expected shape:
/// `{ "app_id": "...", "type": "...", "expires_at": "RFC3339",
///    "features": {...}?, "metadata": {...}?, "trial": bool? }`
fn parse_request(input: &str, footer: Option<&str>) -> Result<LicenseRequest> {
    let value: Value = serde_json::from_str(input).context("parsing request JSON")?;
    let Value::Object(obj) = value else {
        bail!("request must be a JSON object");
    };

    let app_id = required_str(&obj, "app_id")?;
    let license_type = required_str(&obj, "type")?;
    let expires_at: DateTime<Utc> = required_str(&obj, "expires_at")?
        .parse()
        .context("expires_at must be an RFC 3339 timestamp")?;

    let mut request = LicenseRequest::new(&app_id, expires_at, &license_type);
    request.features = optional_map(&obj, "features")?;
    request.metadata = optional_map(&obj, "metadata")?;
    request.trial = matches!(obj.get("trial"), Some(Value::Bool(true)));
    request.footer = footer.unwrap_or_default().as_bytes().to_vec();
    Ok(request)
}

fn required_str(obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => bail!("request field {field:?} must be a string"),
        None => bail!("request is missing field {field:?}"),
    }
}

fn optional_map(obj: &Map<String, Value>, field: &str) -> Result<Option<Map<String, Value>>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        Some(_) => bail!("request field {field:?} must be a JSON object"),
    }
}
