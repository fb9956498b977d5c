// SPDX-License-Identifier: Apache-2.0

use pinmap_api::{ApiError, ApiErrorCode, CreateAddressBody, UpdateAddressBody};
use serde_json::json;

#[test]
fn create_body_rejects_unknown_fields() {
    let raw = r#"{"name":"x","address":"y","lat":38.0,"lng":-77.0,"visible":true}"#;
    assert!(serde_json::from_str::<CreateAddressBody>(raw).is_err());
}

#[test]
fn create_body_converts_to_candidate() {
    let body: CreateAddressBody = serde_json::from_value(json!({
        "name": "Lincoln Memorial",
        "address": "2 Lincoln Memorial Cir NW",
        "lat": 38.8893,
        "lng": -77.0502
    }))
    .expect("deserialize");
    let candidate = body.into_candidate().expect("candidate");
    assert_eq!(candidate.name, "Lincoln Memorial");
}

#[test]
fn create_body_surfaces_validation_failures() {
    let body: CreateAddressBody = serde_json::from_value(json!({
        "name": "",
        "address": "somewhere",
        "lat": 38.8893,
        "lng": -77.0502
    }))
    .expect("deserialize");
    assert!(body.into_candidate().is_err());
}

#[test]
fn update_body_serializes_only_present_fields() {
    let raw = serde_json::to_string(&UpdateAddressBody::visibility(false)).expect("serialize");
    assert_eq!(raw, r#"{"visible":false}"#);
    let raw = serde_json::to_string(&UpdateAddressBody::renamed("New Name")).expect("serialize");
    assert_eq!(raw, r#"{"name":"New Name"}"#);
}

#[test]
fn error_codes_serialize_snake_case() {
    let err = ApiError::new(ApiErrorCode::GeocodingFailed, "lookup failed", json!({}));
    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(value["code"], "geocoding_failed");
}

#[test]
fn error_round_trips() {
    let err = ApiError::not_found(9);
    let raw = serde_json::to_string(&err).expect("serialize");
    let back: ApiError = serde_json::from_str(&raw).expect("deserialize");
    assert_eq!(back, err);
    assert_eq!(back.details["id"], 9);
}
