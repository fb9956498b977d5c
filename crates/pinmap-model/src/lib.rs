#![forbid(unsafe_code)]
//! Pinmap model SSOT.

mod address;
mod bounds;

pub use address::{
    validate_coordinates, AddressId, AddressPatch, AddressRecord, Candidate, ValidationError,
    ADDRESS_MAX_LEN, NAME_MAX_LEN,
};
pub use bounds::MetroBounds;

pub const CRATE_NAME: &str = "pinmap-model";
