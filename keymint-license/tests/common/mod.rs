//! Shared test fixtures for the license suites.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use keymint_keys::KeyPair;
use keymint_license::LicenseRequest;
use serde_json::{json, Map, Value};

/// A deterministic key pair from the all-zero seed.
pub fn test_keypair() -> KeyPair {
    KeyPair::from_seed([0u8; 32])
}

/// A timestamp far in the future.
pub fn far_future() -> DateTime<Utc> {
    "2099-01-01T00:00:00Z".parse().unwrap()
}

/// A timestamp just after the epoch.
pub fn distant_past() -> DateTime<Utc> {
    "1970-01-01T00:00:01Z".parse().unwrap()
}

/// The standard request used across the suites.
pub fn standard_request() -> LicenseRequest {
    let mut request = LicenseRequest::new("com.example.app", far_future(), "pro");
    request.features = Some(features(json!({"max_users": 10})));
    request
}

/// Builds a feature map from a JSON object literal.
pub fn features(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("features fixture must be an object"),
    }
}
