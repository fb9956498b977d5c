// SPDX-License-Identifier: Apache-2.0

use pinmap_model::{AddressId, AddressPatch, AddressRecord, Candidate};

#[test]
fn record_rejects_unknown_fields() {
    let raw = r#"{
      "id": 1,
      "name": "Lincoln Memorial",
      "address": "2 Lincoln Memorial Cir NW",
      "lat": 38.8893,
      "lng": -77.0502,
      "visible": true,
      "extra": "nope"
    }"#;
    assert!(serde_json::from_str::<AddressRecord>(raw).is_err());
}

#[test]
fn record_round_trips_through_json() {
    let candidate =
        Candidate::new("Lincoln Memorial", "2 Lincoln Memorial Cir NW", 38.8893, -77.0502)
            .expect("candidate");
    let record = AddressRecord::from_candidate(AddressId::new(3), candidate);
    let raw = serde_json::to_string(&record).expect("serialize");
    let back: AddressRecord = serde_json::from_str(&raw).expect("deserialize");
    assert_eq!(back, record);
}

#[test]
fn address_id_serializes_transparently() {
    let raw = serde_json::to_string(&AddressId::new(42)).expect("serialize");
    assert_eq!(raw, "42");
}

#[test]
fn patch_omits_absent_fields() {
    let patch = AddressPatch {
        visible: Some(false),
        ..AddressPatch::default()
    };
    let raw = serde_json::to_string(&patch).expect("serialize");
    assert_eq!(raw, r#"{"visible":false}"#);
}

#[test]
fn patch_rejects_unknown_fields() {
    assert!(serde_json::from_str::<AddressPatch>(r#"{"pinned":true}"#).is_err());
}
