//! Symmetric data tokens: JSON maps sealed inside encrypted tokens.

use serde_json::{Map, Value};

use keymint_keys::SymmetricKey;
use keymint_paseto::local;

use crate::error::{LicenseError, LicenseResult};

/// Encrypts a JSON map into an encrypted (`v4.local`) token.
///
/// `footer` travels in the clear and is authenticated; pass an empty slice
/// to omit it.
///
/// # Errors
///
/// Key-handle errors if `key` has been disposed.
pub fn encrypt_data(
    data: &Map<String, Value>,
    key: &SymmetricKey,
    footer: &[u8],
) -> LicenseResult<String> {
    let message = serde_json::to_vec(data)
        .map_err(|e| LicenseError::InvalidPayload(e.to_string()))?;
    let token = local::encrypt(key, &message, footer, b"")?;
    Ok(token)
}

/// Decrypts a data token and returns `(map, footer)`.
///
/// # Errors
///
/// Token-layer errors for authentication failures;
/// [`LicenseError::InvalidPayload`] when the decrypted bytes are not a
/// JSON object.
pub fn decrypt_data(token: &str, key: &SymmetricKey) -> LicenseResult<(Map<String, Value>, Vec<u8>)> {
    let (message, footer) = local::decrypt(token, key, None, b"")?;
    let value: Value = serde_json::from_slice(&message)
        .map_err(|e| LicenseError::InvalidPayload(e.to_string()))?;
    match value {
        Value::Object(map) => Ok((map, footer)),
        _ => Err(LicenseError::InvalidPayload(
            "decrypted payload is not a JSON object".to_string(),
        )),
    }
}
