#![forbid(unsafe_code)]
//! CSV-backed persistence for the Pinmap address collection.

mod csv_store;
mod error;

pub use csv_store::CsvAddressStore;
pub use error::{StoreError, StoreErrorCode};

pub const CRATE_NAME: &str = "pinmap-store";
