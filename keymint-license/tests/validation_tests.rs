mod common;

use common::{distant_past, standard_request, test_keypair};
use keymint_license::{create_license, License, LicenseRequest};

/// Flips the last character of the token body.
fn tamper(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[test]
fn valid_license_passes_both_checks() {
    let pair = test_keypair();
    let license = create_license(pair.signing(), standard_request()).unwrap();

    assert!(license.validate_signature(pair.verifying()).is_valid);
    assert!(license.validate_expiration().is_valid);
    assert!(license.validate(pair.verifying()).is_valid);
}

#[test]
fn tampered_token_fails_signature_check() {
    let pair = test_keypair();
    let license = create_license(pair.signing(), standard_request()).unwrap();
    let tampered = License::from_parts(tamper(license.token()), license.payload().clone());

    let outcome = tampered.validate_signature(pair.verifying());
    assert!(!outcome.is_valid);
    // The message names a signature problem, not an expiration one.
    assert!(!outcome.message.contains("expired"));
}

#[test]
fn expired_license_fails_expiration_check_only() {
    let pair = test_keypair();
    let request = LicenseRequest::new("com.example.app", distant_past(), "pro");
    let license = create_license(pair.signing(), request).unwrap();

    assert!(license.validate_signature(pair.verifying()).is_valid);

    let outcome = license.validate_expiration();
    assert!(!outcome.is_valid);
    assert!(outcome.message.contains("expired"));

    // The combined check reports the expiration failure.
    let combined = license.validate(pair.verifying());
    assert!(!combined.is_valid);
    assert!(combined.message.contains("expired"));
}

#[test]
fn combined_check_reports_signature_failure_first() {
    let pair = test_keypair();
    let request = LicenseRequest::new("com.example.app", distant_past(), "pro");
    let license = create_license(pair.signing(), request).unwrap();
    let tampered = License::from_parts(tamper(license.token()), license.payload().clone());

    let outcome = tampered.validate(pair.verifying());
    assert!(!outcome.is_valid);
    assert!(!outcome.message.contains("expired"));
}

#[test]
fn wrong_key_fails_signature_check() {
    let pair = test_keypair();
    let other = keymint_keys::KeyPair::from_seed([4u8; 32]);
    let license = create_license(pair.signing(), standard_request()).unwrap();

    assert!(!license.validate_signature(other.verifying()).is_valid);
}
