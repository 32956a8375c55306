mod common;

use chrono::{Duration, Utc};
use common::{distant_past, far_future, standard_request, test_keypair};
use keymint_license::{create_license, License, LicenseError, LicenseRequest, ISSUER};
use serde_json::json;

// ── Issuance ─────────────────────────────────────────────────────

#[test]
fn signed_license_roundtrip() {
    let pair = test_keypair();
    let license = create_license(pair.signing(), standard_request()).unwrap();
    assert!(license.token().starts_with("v4.public."));

    let verified = License::from_token(license.token(), pair.verifying()).unwrap();
    assert_eq!(verified.app_id(), "com.example.app");
    assert_eq!(verified.license_type().as_str(), "pro");
    assert_eq!(
        verified.features().unwrap().get("max_users"),
        Some(&json!(10))
    );

    let now = Utc::now();
    assert!(verified.issued_at() <= now);
    assert!(now < verified.expires_at());
}

#[test]
fn issuance_stamps_the_payload() {
    let pair = test_keypair();
    let license = create_license(pair.signing(), standard_request()).unwrap();

    assert_eq!(license.payload().iss, ISSUER);
    assert!(uuid::Uuid::parse_str(license.id()).is_ok());
    // Minute precision on both instants.
    assert_eq!(license.issued_at().format("%S").to_string(), "00");
    assert_eq!(license.expires_at().format("%S").to_string(), "00");
}

#[test]
fn license_type_is_lowercased() {
    let pair = test_keypair();
    let request = LicenseRequest::new("com.example.app", far_future(), "PRO");
    let license = create_license(pair.signing(), request).unwrap();
    assert_eq!(license.license_type().as_str(), "pro");
}

#[test]
fn trial_flag_roundtrip() {
    let pair = test_keypair();
    let mut request = standard_request();
    request.trial = true;

    let license = create_license(pair.signing(), request).unwrap();
    let verified = License::from_token(license.token(), pair.verifying()).unwrap();
    assert!(verified.is_trial());

    let plain = create_license(pair.signing(), standard_request()).unwrap();
    assert!(!plain.is_trial());
}

#[test]
fn metadata_roundtrip() {
    let pair = test_keypair();
    let mut request = standard_request();
    request.metadata = Some(common::features(json!({"customer": "acme"})));

    let license = create_license(pair.signing(), request).unwrap();
    let verified = License::from_token(license.token(), pair.verifying()).unwrap();
    assert_eq!(
        verified.metadata().unwrap().get("customer"),
        Some(&json!("acme"))
    );
}

#[test]
fn footer_is_carried_and_bound() {
    let pair = test_keypair();
    let mut request = standard_request();
    request.footer = b"issuer=keymint".to_vec();

    let license = create_license(pair.signing(), request).unwrap();
    assert_eq!(license.token().matches('.').count(), 3);
    assert!(License::from_token(license.token(), pair.verifying()).is_ok());
}

// ── Request validation ───────────────────────────────────────────

#[test]
fn bad_app_id_rejected() {
    let pair = test_keypair();
    for app_id in ["ab", "has space", "has@at"] {
        let request = LicenseRequest::new(app_id, far_future(), "pro");
        assert!(matches!(
            create_license(pair.signing(), request),
            Err(LicenseError::InvalidPayload(_))
        ));
    }
}

#[test]
fn bad_license_type_rejected() {
    let pair = test_keypair();
    for tier in ["a", "has space"] {
        let request = LicenseRequest::new("com.example.app", far_future(), tier);
        assert!(matches!(
            create_license(pair.signing(), request),
            Err(LicenseError::InvalidPayload(_))
        ));
    }
}

// ── Verification ─────────────────────────────────────────────────

#[test]
fn expired_license_rejected_but_signature_holds() {
    let pair = test_keypair();
    let request = LicenseRequest::new("com.example.app", distant_past(), "pro");
    let license = create_license(pair.signing(), request).unwrap();

    let err = License::from_token(license.token(), pair.verifying()).unwrap_err();
    assert!(matches!(err, LicenseError::Expired { .. }));

    // The signature itself is intact even though the license is expired.
    let outcome = license.validate_signature(pair.verifying());
    assert!(outcome.is_valid);
}

#[test]
fn wrong_key_rejected() {
    let pair = test_keypair();
    let other = keymint_keys::KeyPair::from_seed([8u8; 32]);
    let license = create_license(pair.signing(), standard_request()).unwrap();

    assert!(matches!(
        License::from_token(license.token(), other.verifying()),
        Err(LicenseError::Token(_))
    ));
}

#[test]
fn non_license_payload_rejected() {
    let pair = test_keypair();
    // A validly signed token whose payload is not a license.
    let token =
        keymint_paseto::public::sign(pair.signing(), br#"{"sub":1}"#, b"", b"").unwrap();

    assert!(matches!(
        License::from_token(&token, pair.verifying()),
        Err(LicenseError::InvalidPayload(_))
    ));
}

#[test]
fn bad_app_id_in_token_rejected() {
    let pair = test_keypair();
    // Signed by the right key but with an out-of-charset app_id.
    let payload = json!({
        "sub": "8c41f4e6-6de2-4492-baf5-a439b59e991a",
        "iat": "2020-01-01T00:00:00Z",
        "exp": "2099-01-01T00:00:00Z",
        "iss": "licensify",
        "app_id": "has space",
        "type": "pro",
    });
    let token = keymint_paseto::public::sign(
        pair.signing(),
        payload.to_string().as_bytes(),
        b"",
        b"",
    )
    .unwrap();

    assert!(matches!(
        License::from_token(&token, pair.verifying()),
        Err(LicenseError::InvalidPayload(_))
    ));
}

// ── Expiration boundary ──────────────────────────────────────────

#[test]
fn expiring_now_counts_as_expired() {
    let pair = test_keypair();
    // exp truncates to the top of the current minute, which is <= now.
    let request = LicenseRequest::new("com.example.app", Utc::now(), "pro");
    let license = create_license(pair.signing(), request).unwrap();

    assert!(matches!(
        License::from_token(license.token(), pair.verifying()),
        Err(LicenseError::Expired { .. })
    ));
}

#[test]
fn expiring_next_minute_is_active() {
    let pair = test_keypair();
    // Two minutes out so truncation still leaves the expiry in the future.
    let request =
        LicenseRequest::new("com.example.app", Utc::now() + Duration::minutes(2), "pro");
    let license = create_license(pair.signing(), request).unwrap();

    assert!(License::from_token(license.token(), pair.verifying()).is_ok());
}
