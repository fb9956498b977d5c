// SPDX-License-Identifier: Apache-2.0

use crate::error::{GeocodeError, GeocodeErrorCode};
use pinmap_model::{Candidate, MetroBounds};
use serde::Deserialize;
use tracing::{info, warn};

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

const PLACES_SEARCH_URL: &str =
    "https://maps.googleapis.com/maps/api/place/textsearch/json";
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Resolves one free-text query to a geocoded candidate.
///
/// `Ok(None)` means the service answered but found nothing usable;
/// `Err` is reserved for transport, configuration, and decode failures.
pub trait Geocoder {
    fn lookup(&self, query: &str) -> Result<Option<Candidate>, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

/// Two-strategy resolver against the Google Maps web services: the places
/// text search answers best for venues and businesses, the geocoding
/// endpoint for plain street addresses.
pub struct HttpGeocoder {
    client: reqwest::blocking::Client,
    api_key: String,
    bounds: MetroBounds,
    places_url: String,
    geocode_url: String,
}

impl HttpGeocoder {
    #[must_use]
    pub fn new(api_key: impl Into<String>, bounds: MetroBounds) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            bounds,
            places_url: PLACES_SEARCH_URL.to_string(),
            geocode_url: GEOCODE_URL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, GeocodeError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            GeocodeError::new(
                GeocodeErrorCode::Config,
                format!("{API_KEY_ENV} environment variable not set"),
            )
        })?;
        Ok(Self::new(api_key, MetroBounds::default()))
    }

    /// Overrides the service endpoints, for tests against a local server.
    #[must_use]
    pub fn with_endpoints(
        mut self,
        places_url: impl Into<String>,
        geocode_url: impl Into<String>,
    ) -> Self {
        self.places_url = places_url.into();
        self.geocode_url = geocode_url.into();
        self
    }

    fn places_search(&self, query: &str) -> Result<Option<Candidate>, GeocodeError> {
        let response = self
            .client
            .get(&self.places_url)
            .query(&[("query", query), ("key", self.api_key.as_str())])
            .send()
            .map_err(|e| GeocodeError::new(GeocodeErrorCode::Network, e.to_string()))?;
        let body: PlacesResponse = response
            .json()
            .map_err(|e| GeocodeError::new(GeocodeErrorCode::Malformed, e.to_string()))?;
        if body.status != "OK" {
            return Ok(None);
        }
        let Some(place) = body.results.into_iter().next() else {
            return Ok(None);
        };
        let lat = place.geometry.location.lat;
        let lng = place.geometry.location.lng;
        let name = place.name.unwrap_or_default();
        if !self.bounds.contains(lat, lng) {
            warn!(query, name = %name, lat, lng, "place resolved outside metro bounds, skipping");
            return Ok(None);
        }
        let address = place.formatted_address.unwrap_or_default();
        match Candidate::new(name.trim(), address.trim(), lat, lng) {
            Ok(candidate) => {
                info!(query, name = %candidate.name, "resolved via places search");
                Ok(Some(candidate))
            }
            Err(e) => {
                warn!(query, error = %e, "places result failed validation");
                Ok(None)
            }
        }
    }

    fn geocode_fallback(&self, query: &str) -> Result<Option<Candidate>, GeocodeError> {
        let response = self
            .client
            .get(&self.geocode_url)
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()
            .map_err(|e| GeocodeError::new(GeocodeErrorCode::Network, e.to_string()))?;
        let body: GeocodeResponse = response
            .json()
            .map_err(|e| GeocodeError::new(GeocodeErrorCode::Malformed, e.to_string()))?;
        if body.status != "OK" {
            return Ok(None);
        }
        let Some(result) = body.results.into_iter().next() else {
            return Ok(None);
        };
        let lat = result.geometry.location.lat;
        let lng = result.geometry.location.lng;
        // The geocoding endpoint carries no display name; use the part of
        // the raw query before the first comma.
        let name = query.split(',').next().unwrap_or(query).trim();
        if !self.bounds.contains(lat, lng) {
            warn!(query, lat, lng, "geocoded address outside metro bounds");
        }
        match Candidate::new(name, result.formatted_address.trim(), lat, lng) {
            Ok(candidate) => {
                info!(query, name = %candidate.name, "resolved via geocoding fallback");
                Ok(Some(candidate))
            }
            Err(e) => {
                warn!(query, error = %e, "geocoding result failed validation");
                Ok(None)
            }
        }
    }
}

/// Appends a region hint unless the query already names the area.
#[must_use]
pub fn with_region_hint(query: &str) -> String {
    let lowered = query.to_lowercase();
    if lowered.contains("washington") || lowered.contains("dc") {
        query.to_string()
    } else {
        format!("{query}, Washington DC")
    }
}

impl Geocoder for HttpGeocoder {
    fn lookup(&self, query: &str) -> Result<Option<Candidate>, GeocodeError> {
        let hinted = with_region_hint(query);
        if let Some(candidate) = self.places_search(&hinted)? {
            return Ok(Some(candidate));
        }
        self.geocode_fallback(&hinted)
    }
}

#[cfg(test)]
mod tests {
    use super::with_region_hint;

    #[test]
    fn region_hint_appended_when_absent() {
        assert_eq!(
            with_region_hint("Lincoln Memorial"),
            "Lincoln Memorial, Washington DC"
        );
    }

    #[test]
    fn region_hint_skipped_when_present() {
        assert_eq!(
            with_region_hint("Lincoln Memorial, Washington DC"),
            "Lincoln Memorial, Washington DC"
        );
        assert_eq!(with_region_hint("Union Station DC"), "Union Station DC");
    }
}
