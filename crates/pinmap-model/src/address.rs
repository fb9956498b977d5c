// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const NAME_MAX_LEN: usize = 256;
pub const ADDRESS_MAX_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    NotFinite(&'static str),
    OutOfRange(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::NotFinite(name) => write!(f, "{name} must be a finite number"),
            Self::OutOfRange(name) => write!(f, "{name} is outside the valid coordinate range"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Store-assigned, stable record identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AddressId(u64);

impl AddressId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for AddressId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty("name"));
    }
    if name.trim() != name {
        return Err(ValidationError::Trimmed("name"));
    }
    if name.len() > NAME_MAX_LEN {
        return Err(ValidationError::TooLong("name", NAME_MAX_LEN));
    }
    Ok(())
}

fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(ValidationError::Empty("address"));
    }
    if address.len() > ADDRESS_MAX_LEN {
        return Err(ValidationError::TooLong("address", ADDRESS_MAX_LEN));
    }
    Ok(())
}

pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() {
        return Err(ValidationError::NotFinite("lat"));
    }
    if !lng.is_finite() {
        return Err(ValidationError::NotFinite("lng"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::OutOfRange("lat"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ValidationError::OutOfRange("lng"));
    }
    Ok(())
}

/// A geocoded add-flow result: everything a record carries except identity
/// and visibility, which the store assigns on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Candidate {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let address = address.into();
        validate_name(&name)?;
        validate_address(&address)?;
        validate_coordinates(lat, lng)?;
        Ok(Self {
            name,
            address,
            lat,
            lng,
        })
    }
}

/// One address entity as persisted and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressRecord {
    pub id: AddressId,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub visible: bool,
}

impl AddressRecord {
    /// Creation path: identity comes from the store, `visible` defaults true.
    #[must_use]
    pub fn from_candidate(id: AddressId, candidate: Candidate) -> Self {
        Self {
            id,
            name: candidate.name,
            address: candidate.address,
            lat: candidate.lat,
            lng: candidate.lng,
            visible: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_address(&self.address)?;
        validate_coordinates(self.lat, self.lng)
    }
}

/// Partial update applied through the store. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl AddressPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.visible.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(address) = &self.address {
            validate_address(address)?;
        }
        if let Some(lat) = self.lat {
            if !lat.is_finite() {
                return Err(ValidationError::NotFinite("lat"));
            }
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ValidationError::OutOfRange("lat"));
            }
        }
        if let Some(lng) = self.lng {
            if !lng.is_finite() {
                return Err(ValidationError::NotFinite("lng"));
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ValidationError::OutOfRange("lng"));
            }
        }
        Ok(())
    }

    /// Applies the patch in place, leaving absent fields untouched.
    pub fn apply_to(&self, record: &mut AddressRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(address) = &self.address {
            record.address = address.clone();
        }
        if let Some(lat) = self.lat {
            record.lat = lat;
        }
        if let Some(lng) = self.lng {
            record.lng = lng;
        }
        if let Some(visible) = self.visible {
            record.visible = visible;
        }
    }
}
