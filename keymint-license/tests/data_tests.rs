mod common;

use keymint_keys::SymmetricKey;
use keymint_license::{decrypt_data, encrypt_data, LicenseError};
use serde_json::json;

fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

#[test]
fn roundtrip_with_footer() {
    let key = SymmetricKey::from_bytes([0u8; 32]);
    let data = object(json!({"x": 1}));

    let token = encrypt_data(&data, &key, b"v=1").unwrap();
    assert!(token.starts_with("v4.local."));

    let (decrypted, footer) = decrypt_data(&token, &key).unwrap();
    assert_eq!(decrypted, data);
    assert_eq!(footer, b"v=1");
}

#[test]
fn roundtrip_without_footer() {
    let key = SymmetricKey::generate();
    let data = object(json!({"nested": {"deep": [1, 2, 3]}, "flag": true}));

    let token = encrypt_data(&data, &key, b"").unwrap();
    let (decrypted, footer) = decrypt_data(&token, &key).unwrap();
    assert_eq!(decrypted, data);
    assert!(footer.is_empty());
}

#[test]
fn wrong_key_rejected() {
    let key = SymmetricKey::from_bytes([0u8; 32]);
    let other = SymmetricKey::from_bytes([1u8; 32]);
    let token = encrypt_data(&object(json!({"x": 1})), &key, b"").unwrap();

    assert!(matches!(
        decrypt_data(&token, &other),
        Err(LicenseError::Token(_))
    ));
}

#[test]
fn tampered_token_rejected() {
    let key = SymmetricKey::from_bytes([0u8; 32]);
    let token = encrypt_data(&object(json!({"x": 1})), &key, b"").unwrap();

    let mut chars: Vec<char> = token.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    assert!(decrypt_data(&tampered, &key).is_err());
}

#[test]
fn non_object_payload_rejected() {
    let key = SymmetricKey::from_bytes([0u8; 32]);
    // A valid encrypted token whose payload is a JSON array.
    let token = keymint_paseto::local::encrypt(&key, b"[1,2,3]", b"", b"").unwrap();

    assert!(matches!(
        decrypt_data(&token, &key),
        Err(LicenseError::InvalidPayload(_))
    ));
}
