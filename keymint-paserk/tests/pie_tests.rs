mod common;

use common::{tamper_last_char, test_keypair, test_symmetric_key};
use keymint_keys::SymmetricKey;
use keymint_paserk::{pie, PaserkError};

#[test]
fn local_wrap_roundtrip() {
    let key = test_symmetric_key();
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);

    let wrapped = pie::wrap_local(&key, &wrapping).unwrap();
    assert!(wrapped.starts_with("k4.local-wrap.pie."));

    let unwrapped = pie::unwrap_local(&wrapped, &wrapping).unwrap();
    assert_eq!(*unwrapped.key_bytes().unwrap(), *key.key_bytes().unwrap());
}

#[test]
fn secret_wrap_roundtrip() {
    let pair = test_keypair();
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);

    let wrapped = pie::wrap_secret(&pair, &wrapping).unwrap();
    assert!(wrapped.starts_with("k4.secret-wrap.pie."));

    let unwrapped = pie::unwrap_secret(&wrapped, &wrapping).unwrap();
    assert_eq!(
        *unwrapped.signing().key_bytes().unwrap(),
        *pair.signing().key_bytes().unwrap()
    );
    assert_eq!(
        *unwrapped.verifying().key_bytes().unwrap(),
        *pair.verifying().key_bytes().unwrap()
    );
}

#[test]
fn wrong_wrapping_key_rejected() {
    let key = test_symmetric_key();
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);
    let other = SymmetricKey::from_bytes([0x11u8; 32]);

    let wrapped = pie::wrap_local(&key, &wrapping).unwrap();
    let err = pie::unwrap_local(&wrapped, &other).unwrap_err();
    assert!(matches!(err, PaserkError::AuthFailed));
}

#[test]
fn tampered_wrap_rejected() {
    let key = test_symmetric_key();
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);

    let wrapped = pie::wrap_local(&key, &wrapping).unwrap();
    let tampered = tamper_last_char(&wrapped);

    let err = pie::unwrap_local(&tampered, &wrapping).unwrap_err();
    assert!(matches!(
        err,
        PaserkError::AuthFailed | PaserkError::BadEncoding(_)
    ));
}

#[test]
fn local_and_secret_bodies_are_not_interchangeable() {
    let pair = test_keypair();
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);

    let wrapped = pie::wrap_secret(&pair, &wrapping).unwrap();
    let err = pie::unwrap_local(&wrapped, &wrapping).unwrap_err();
    assert!(matches!(err, PaserkError::WrongPrefix { .. }));
}

#[test]
fn truncated_wrap_rejected() {
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);
    let err = pie::unwrap_local("k4.local-wrap.pie.AAAA", &wrapping).unwrap_err();
    assert!(matches!(err, PaserkError::Truncated));
}

#[test]
fn distinct_wraps_from_random_nonce() {
    let key = test_symmetric_key();
    let wrapping = SymmetricKey::from_bytes([0x10u8; 32]);
    let a = pie::wrap_local(&key, &wrapping).unwrap();
    let b = pie::wrap_local(&key, &wrapping).unwrap();
    assert_ne!(a, b);
}
