#![forbid(unsafe_code)]
//! Wire contract shared by the Pinmap server and client.

mod dto;
mod errors;

pub use dto::{CreateAddressBody, DeleteResponseDto, ProcessResponseDto, UpdateAddressBody};
pub use errors::{ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "pinmap-api";
