#![forbid(unsafe_code)]
//! Batch geocoding for raw address lists.
//!
//! The pipeline mirrors the add-dialog resolution flow, run offline: each
//! raw line is resolved through a places text search with a geocoding
//! fallback, validated against the metro bounds, and written to the CSV
//! store with a sequential id.

mod error;
mod geocoder;
mod job;

pub use error::{GeocodeError, GeocodeErrorCode};
pub use geocoder::{with_region_hint, Geocoder, HttpGeocoder, API_KEY_ENV};
pub use job::{read_raw_queries, run_process_job, JobReport, ProcessOptions};

pub const CRATE_NAME: &str = "pinmap-geocode";
