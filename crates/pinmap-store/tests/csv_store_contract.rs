// SPDX-License-Identifier: Apache-2.0

use pinmap_model::{AddressId, AddressPatch, Candidate};
use pinmap_store::{CsvAddressStore, StoreErrorCode};
use tempfile::tempdir;

fn candidate(name: &str, lat: f64, lng: f64) -> Candidate {
    Candidate::new(name, format!("{name}, Washington, DC"), lat, lng).expect("candidate")
}

#[test]
fn missing_file_loads_as_empty_store() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    assert!(store.load().expect("load").is_empty());
}

#[test]
fn create_assigns_sequential_ids_starting_at_one() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    let a = store
        .create(candidate("Lincoln Memorial", 38.8893, -77.0502))
        .expect("create");
    let b = store
        .create(candidate("Washington Monument", 38.8895, -77.0353))
        .expect("create");
    assert_eq!(a.id, AddressId::new(1));
    assert_eq!(b.id, AddressId::new(2));
    assert!(a.visible && b.visible);
}

#[test]
fn ids_do_not_reuse_after_delete() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    store
        .create(candidate("Lincoln Memorial", 38.8893, -77.0502))
        .expect("create");
    let b = store
        .create(candidate("Washington Monument", 38.8895, -77.0353))
        .expect("create");
    store.delete(AddressId::new(1)).expect("delete");
    let c = store
        .create(candidate("Capitol", 38.8899, -77.0091))
        .expect("create");
    assert_eq!(c.id, AddressId::new(b.id.value() + 1));
}

#[test]
fn round_trips_records_in_file_order() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    let names = ["Lincoln Memorial", "Washington Monument", "Capitol"];
    for name in names {
        store.create(candidate(name, 38.89, -77.03)).expect("create");
    }
    let loaded = store.load().expect("load");
    let loaded_names: Vec<&str> = loaded.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(loaded_names, names);
}

#[test]
fn update_patches_only_provided_fields() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    let created = store
        .create(candidate("Lincoln Memorial", 38.8893, -77.0502))
        .expect("create");
    let patch = AddressPatch {
        visible: Some(false),
        ..AddressPatch::default()
    };
    let updated = store.update(created.id, &patch).expect("update");
    assert!(!updated.visible);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.lat, created.lat);

    let reloaded = store.load().expect("load");
    assert!(!reloaded[0].visible);
}

#[test]
fn update_missing_record_is_not_found() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    let err = store
        .update(AddressId::new(99), &AddressPatch::default())
        .expect_err("missing");
    assert_eq!(err.code, StoreErrorCode::NotFound);
}

#[test]
fn update_rejects_invalid_patch() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    let created = store
        .create(candidate("Lincoln Memorial", 38.8893, -77.0502))
        .expect("create");
    let patch = AddressPatch {
        name: Some(String::new()),
        ..AddressPatch::default()
    };
    let err = store.update(created.id, &patch).expect_err("invalid");
    assert_eq!(err.code, StoreErrorCode::Validation);
}

#[test]
fn delete_missing_record_is_not_found() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    let err = store.delete(AddressId::new(7)).expect_err("missing");
    assert_eq!(err.code, StoreErrorCode::NotFound);
}

#[test]
fn reads_python_capitalized_booleans() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("addresses.csv");
    std::fs::write(
        &path,
        "id,name,address,lat,lng,visible\n1,Lincoln Memorial,\"2 Lincoln Memorial Cir NW\",38.8893,-77.0502,True\n",
    )
    .expect("write fixture");
    let store = CsvAddressStore::new(&path);
    let records = store.load().expect("load");
    assert_eq!(records.len(), 1);
    assert!(records[0].visible);
}

#[test]
fn malformed_rows_are_reported_as_corrupt() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("addresses.csv");
    std::fs::write(
        &path,
        "id,name,address,lat,lng,visible\n1,Lincoln Memorial,addr,not-a-number,-77.0502,true\n",
    )
    .expect("write fixture");
    let store = CsvAddressStore::new(&path);
    let err = store.load().expect_err("corrupt");
    assert_eq!(err.code, StoreErrorCode::Corrupt);
}

#[test]
fn no_temp_file_left_behind_after_save() {
    let dir = tempdir().expect("tempdir");
    let store = CsvAddressStore::new(dir.path().join("addresses.csv"));
    store
        .create(candidate("Lincoln Memorial", 38.8893, -77.0502))
        .expect("create");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
