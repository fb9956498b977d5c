// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use pinmap_model::{AddressId, AddressPatch, AddressRecord, Candidate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Flat CSV row. Kept separate from the domain record so the on-disk bool
/// spelling stays tolerant: files written by other tooling may carry
/// `True`/`False`.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: u64,
    name: String,
    address: String,
    lat: f64,
    lng: f64,
    visible: String,
}

impl CsvRow {
    fn from_record(record: &AddressRecord) -> Self {
        Self {
            id: record.id.value(),
            name: record.name.clone(),
            address: record.address.clone(),
            lat: record.lat,
            lng: record.lng,
            visible: record.visible.to_string(),
        }
    }

    fn into_record(self) -> Result<AddressRecord, StoreError> {
        let visible = match self.visible.to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(StoreError::new(
                    StoreErrorCode::Corrupt,
                    format!("row {}: visible must be a boolean, got {other:?}", self.id),
                ))
            }
        };
        let record = AddressRecord {
            id: AddressId::new(self.id),
            name: self.name,
            address: self.address,
            lat: self.lat,
            lng: self.lng,
            visible,
        };
        record.validate().map_err(|e| {
            StoreError::new(
                StoreErrorCode::Corrupt,
                format!("row {}: {e}", record.id),
            )
        })?;
        Ok(record)
    }
}

/// Address collection persisted as one CSV file with header
/// `id,name,address,lat,lng,visible`.
///
/// Every mutation rewrites the whole file through a temp-file-then-rename
/// replace. Concurrent writers are not coordinated.
#[derive(Debug, Clone)]
pub struct CsvAddressStore {
    path: PathBuf,
}

impl CsvAddressStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records in file order. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<AddressRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            StoreError::new(StoreErrorCode::Io, format!("open {}: {e}", self.path.display()))
        })?;
        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| {
                StoreError::new(StoreErrorCode::Corrupt, format!("malformed csv row: {e}"))
            })?;
            records.push(row.into_record()?);
        }
        Ok(records)
    }

    /// Rewrites the whole file atomically via a sibling temp file.
    pub fn save(&self, records: &[AddressRecord]) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("csv.tmp");
        let mut writer = csv::Writer::from_path(&tmp).map_err(|e| {
            StoreError::new(StoreErrorCode::Io, format!("open {}: {e}", tmp.display()))
        })?;
        for record in records {
            writer
                .serialize(CsvRow::from_record(record))
                .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("write row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("flush: {e}")))?;
        drop(writer);
        fs::rename(&tmp, &self.path).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("rename {} -> {}: {e}", tmp.display(), self.path.display()),
            )
        })
    }

    pub fn list(&self) -> Result<Vec<AddressRecord>, StoreError> {
        self.load()
    }

    /// Assigns `max(id) + 1`, starting at 1 for an empty store.
    #[must_use]
    pub fn next_id(records: &[AddressRecord]) -> AddressId {
        AddressId::new(records.iter().map(|r| r.id.value()).max().unwrap_or(0) + 1)
    }

    /// Creates a record from a geocoded candidate. Identity is assigned here
    /// and `visible` defaults true.
    pub fn create(&self, candidate: Candidate) -> Result<AddressRecord, StoreError> {
        let mut records = self.load()?;
        let record = AddressRecord::from_candidate(Self::next_id(&records), candidate);
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    /// Applies a partial patch to one record and persists.
    pub fn update(&self, id: AddressId, patch: &AddressPatch) -> Result<AddressRecord, StoreError> {
        patch
            .validate()
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        let mut records = self.load()?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::not_found(id));
        };
        patch.apply_to(record);
        let updated = record.clone();
        self.save(&records)?;
        Ok(updated)
    }

    pub fn delete(&self, id: AddressId) -> Result<(), StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::not_found(id));
        }
        self.save(&records)
    }
}
