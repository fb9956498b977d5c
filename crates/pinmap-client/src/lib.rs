#![forbid(unsafe_code)]
//! Client-side state for the Pinmap UI.
//!
//! [`AddressBook`] mirrors the remote collection with optimistic mutations
//! rolled back on failed requests, [`PinBoard`] keeps marker popups in sync
//! with the pinned set, and [`AddDialog`] drives the add flow. Remote and
//! notification surfaces are traits so the state machines run headless in
//! tests.

mod api;
mod book;
mod dialog;
mod http;
mod pins;

pub use api::{AddressApi, ApiFailure, LogNotifier, Notifier};
pub use book::AddressBook;
pub use dialog::{AddDialog, ConfirmOutcome};
pub use http::HttpAddressApi;
pub use pins::{CloseReason, PinBoard, PopupHost};

pub const CRATE_NAME: &str = "pinmap-client";
