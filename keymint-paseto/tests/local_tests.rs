mod common;

use common::{tamper_last_char, test_symmetric_key};
use keymint_keys::SymmetricKey;
use keymint_paseto::{local, PasetoError};

// ── Known-answer vector ──────────────────────────────────────────

/// Upstream v4 test vector: fixed key, all-zero nonce, no footer.
#[test]
fn known_answer_vector() {
    let mut key_bytes = [0u8; 32];
    for (i, b) in key_bytes.iter_mut().enumerate() {
        *b = 0x70 + i as u8;
    }
    let key = SymmetricKey::from_bytes(key_bytes);
    let payload = br#"{"data":"this is a secret message","exp":"2022-01-01T00:00:00+00:00"}"#;

    let token = local::encrypt_with_nonce(&key, &[0u8; 32], payload, b"", b"").unwrap();
    assert_eq!(
        token,
        "v4.local.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAQAr68PS4AXe7If_ZgesdkUMvSwscFlAl1pk5HC0e8kApeaqMfGo_7OpBnwJOAbY9V7WU6abu74MmcUE8YWAiaArVI8XJ5hOb_4v9RmDkneN0S92dx0OW4pgy7omxgf3S8c3LlQg"
    );

    let (message, footer) = local::decrypt(&token, &key, None, b"").unwrap();
    assert_eq!(message, payload);
    assert!(footer.is_empty());
}

// ── Roundtrips ───────────────────────────────────────────────────

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = test_symmetric_key();
    let token = local::encrypt(&key, b"{\"x\":1}", b"", b"").unwrap();
    assert!(token.starts_with("v4.local."));

    let (message, footer) = local::decrypt(&token, &key, None, b"").unwrap();
    assert_eq!(message, b"{\"x\":1}");
    assert!(footer.is_empty());
}

#[test]
fn roundtrip_with_footer_and_assertion() {
    let key = test_symmetric_key();
    let token = local::encrypt(&key, b"secret", b"v=1", b"ctx").unwrap();

    let (message, footer) = local::decrypt(&token, &key, Some(b"v=1"), b"ctx").unwrap();
    assert_eq!(message, b"secret");
    assert_eq!(footer, b"v=1");
}

#[test]
fn random_nonce_gives_distinct_tokens() {
    let key = test_symmetric_key();
    let a = local::encrypt(&key, b"same", b"", b"").unwrap();
    let b = local::encrypt(&key, b"same", b"", b"").unwrap();
    assert_ne!(a, b);
}

#[test]
fn empty_message_roundtrip() {
    let key = test_symmetric_key();
    let token = local::encrypt(&key, b"", b"", b"").unwrap();
    let (message, _) = local::decrypt(&token, &key, None, b"").unwrap();
    assert!(message.is_empty());
}

// ── Rejections ───────────────────────────────────────────────────

#[test]
fn tampered_token_rejected() {
    let key = test_symmetric_key();
    let token = local::encrypt(&key, b"secret", b"", b"").unwrap();
    let tampered = tamper_last_char(&token);

    let err = local::decrypt(&tampered, &key, None, b"").unwrap_err();
    assert!(matches!(
        err,
        PasetoError::AuthFailed | PasetoError::BadEncoding(_)
    ));
}

#[test]
fn wrong_key_rejected() {
    let key = test_symmetric_key();
    let other = SymmetricKey::from_bytes([0x99u8; 32]);
    let token = local::encrypt(&key, b"secret", b"", b"").unwrap();

    let err = local::decrypt(&token, &other, None, b"").unwrap_err();
    assert!(matches!(err, PasetoError::AuthFailed));
}

#[test]
fn different_implicit_assertion_rejected() {
    let key = test_symmetric_key();
    let token = local::encrypt(&key, b"secret", b"", b"ctx-a").unwrap();

    let err = local::decrypt(&token, &key, None, b"ctx-b").unwrap_err();
    assert!(matches!(err, PasetoError::AuthFailed));
}

#[test]
fn swapped_footer_rejected() {
    let key = test_symmetric_key();
    let a = local::encrypt(&key, b"secret", b"footer-a", b"").unwrap();
    let b = local::encrypt(&key, b"secret", b"footer-b", b"").unwrap();

    let without_footer = a.rsplitn(2, '.').last().unwrap();
    let footer_b = b.rsplit('.').next().unwrap();
    let franken = format!("{without_footer}.{footer_b}");

    let err = local::decrypt(&franken, &key, None, b"").unwrap_err();
    assert!(matches!(err, PasetoError::AuthFailed));
}

#[test]
fn wrong_purpose_rejected() {
    let key = test_symmetric_key();
    let err = local::decrypt("v4.public.AAAA", &key, None, b"").unwrap_err();
    assert!(matches!(err, PasetoError::BadVersion { .. }));
}

#[test]
fn truncated_body_rejected() {
    let key = test_symmetric_key();
    let err = local::decrypt("v4.local.AAAA", &key, None, b"").unwrap_err();
    assert!(matches!(err, PasetoError::Truncated));
}

#[test]
fn disposed_key_rejected() {
    let mut key = test_symmetric_key();
    let token = local::encrypt(&key, b"secret", b"", b"").unwrap();
    key.dispose();

    assert!(local::encrypt(&key, b"x", b"", b"").is_err());
    assert!(local::decrypt(&token, &key, None, b"").is_err());
}
