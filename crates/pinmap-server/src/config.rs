// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin allowed to call the API from a browser (the dev frontend).
    pub cors_origin: String,
    pub max_body_bytes: usize,
    /// Whether `POST /api/addresses/process` is exposed.
    pub enable_process_endpoint: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origin: "http://localhost:5173".to_string(),
            max_body_bytes: 64 * 1024,
            enable_process_endpoint: true,
        }
    }
}

/// File layout the server works against: the CSV store plus the raw and
/// failed address files used by the geocoding job.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub csv_path: PathBuf,
    pub raw_path: PathBuf,
    pub failed_path: PathBuf,
}

impl DataPaths {
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            csv_path: dir.join("addresses.csv"),
            raw_path: dir.join("addresses_raw.txt"),
            failed_path: dir.join("addresses_failed.txt"),
        }
    }
}
