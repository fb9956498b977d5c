// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Rough bounding box a geocoded result is expected to fall in.
///
/// Results outside the box are not invalid records; the geocoding pipeline
/// uses the box to reject or warn about lookups that resolved far away from
/// the area the map covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetroBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl MetroBounds {
    /// DC metro area.
    #[must_use]
    pub const fn dc_metro() -> Self {
        Self {
            lat_min: 38.5,
            lat_max: 39.5,
            lng_min: -77.5,
            lng_max: -76.5,
        }
    }

    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat)
            && (self.lng_min..=self.lng_max).contains(&lng)
    }
}

impl Default for MetroBounds {
    fn default() -> Self {
        Self::dc_metro()
    }
}
