// SPDX-License-Identifier: Apache-2.0

use pinmap_model::{AddressPatch, Candidate, ValidationError};
use serde::{Deserialize, Serialize};

/// `POST /api/addresses` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAddressBody {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl CreateAddressBody {
    pub fn into_candidate(self) -> Result<Candidate, ValidationError> {
        Candidate::new(self.name, self.address, self.lat, self.lng)
    }
}

/// `PATCH /api/addresses/{id}` request body. Every field optional; absent
/// fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAddressBody {
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

impl UpdateAddressBody {
    #[must_use]
    pub fn into_patch(self) -> AddressPatch {
        AddressPatch {
            name: self.name,
            address: self.address,
            lat: self.lat,
            lng: self.lng,
            visible: self.visible,
        }
    }

    #[must_use]
    pub fn visibility(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn renamed(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// `DELETE /api/addresses/{id}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteResponseDto {
    pub message: String,
}

/// `POST /api/addresses/process` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessResponseDto {
    pub message: String,
    pub processed: usize,
    pub successful: usize,
    pub failed: Vec<String>,
}
