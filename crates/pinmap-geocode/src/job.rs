// SPDX-License-Identifier: Apache-2.0

use crate::error::{GeocodeError, GeocodeErrorCode};
use crate::geocoder::Geocoder;
use pinmap_model::AddressRecord;
use pinmap_store::CsvAddressStore;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub input_path: PathBuf,
    pub csv_path: PathBuf,
    pub failed_path: PathBuf,
    /// Continue from the existing CSV instead of starting fresh.
    pub append: bool,
}

impl ProcessOptions {
    /// Conventional layout: `addresses_raw.txt`, `addresses.csv` and
    /// `addresses_failed.txt` side by side in one directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            input_path: dir.join("addresses_raw.txt"),
            csv_path: dir.join("addresses.csv"),
            failed_path: dir.join("addresses_failed.txt"),
            append: false,
        }
    }

    #[must_use]
    pub fn appending(mut self) -> Self {
        self.append = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobReport {
    pub processed: usize,
    pub successful: usize,
    pub failed: Vec<String>,
}

/// Reads raw queries, one per line. Blank lines and `#` comments skipped.
pub fn read_raw_queries(options: &ProcessOptions) -> Result<Vec<String>, GeocodeError> {
    let raw = fs::read_to_string(&options.input_path).map_err(|e| {
        GeocodeError::new(
            GeocodeErrorCode::Io,
            format!("read {}: {e}", options.input_path.display()),
        )
    })?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}

/// Runs the batch geocoding job: resolve every raw query, assign sequential
/// ids, persist through the CSV store, and record unresolved queries in the
/// failed-addresses file.
///
/// A lookup error fails that one query and the run continues; there is no
/// retry.
pub fn run_process_job(
    options: &ProcessOptions,
    geocoder: &dyn Geocoder,
) -> Result<JobReport, GeocodeError> {
    let queries = read_raw_queries(options)?;
    let store = CsvAddressStore::new(&options.csv_path);

    let mut records: Vec<AddressRecord> = if options.append {
        store
            .load()
            .map_err(|e| GeocodeError::new(GeocodeErrorCode::Io, e.to_string()))?
    } else {
        Vec::new()
    };

    let mut report = JobReport {
        processed: queries.len(),
        ..JobReport::default()
    };
    info!(count = queries.len(), append = options.append, "processing raw addresses");

    for query in &queries {
        match geocoder.lookup(query) {
            Ok(Some(candidate)) => {
                let id = CsvAddressStore::next_id(&records);
                let record = AddressRecord::from_candidate(id, candidate);
                info!(query = %query, id = %record.id, name = %record.name, "geocoded");
                records.push(record);
                report.successful += 1;
            }
            Ok(None) => {
                warn!(query = %query, "no geocoding result");
                report.failed.push(query.clone());
            }
            Err(e) => {
                warn!(query = %query, error = %e, "lookup failed");
                report.failed.push(query.clone());
            }
        }
    }

    if !records.is_empty() {
        store
            .save(&records)
            .map_err(|e| GeocodeError::new(GeocodeErrorCode::Io, e.to_string()))?;
    }

    if report.failed.is_empty() {
        if options.failed_path.exists() {
            // Stale failures from an earlier run.
            let _ = fs::remove_file(&options.failed_path);
        }
    } else {
        let mut body = report.failed.join("\n");
        body.push('\n');
        fs::write(&options.failed_path, body).map_err(|e| {
            GeocodeError::new(
                GeocodeErrorCode::Io,
                format!("write {}: {e}", options.failed_path.display()),
            )
        })?;
    }

    info!(
        processed = report.processed,
        successful = report.successful,
        failed = report.failed.len(),
        "process job finished"
    );
    Ok(report)
}
