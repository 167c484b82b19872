use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_names: Option<BTreeMap<String, String>>,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl GeocodingResult {
    /// Result for a raw coordinate pair; no lookup is involved so the country stays empty.
    pub fn from_coordinates(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("Location at {lat:.4}, {lon:.4}"),
            local_names: None,
            lat,
            lon,
            country: String::new(),
            state: None,
        }
    }
}

/// Response of the `zip` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZipGeocodingResult {
    pub zip: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
}

impl From<ZipGeocodingResult> for GeocodingResult {
    fn from(value: ZipGeocodingResult) -> Self {
        Self {
            name: value.name,
            local_names: None,
            lat: value.lat,
            lon: value.lon,
            country: value.country,
            state: None,
        }
    }
}
