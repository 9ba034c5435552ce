use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::TravelConfig;
use crate::error::SearchError;

/// A resolved point on the map. Stored as latitude/longitude regardless
/// of the order the provider used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Forward geocoder over the Geoapify `/v1/geocode/search` endpoint.
///
/// Geoapify exposes the same lookup in two shapes: the default GeoJSON
/// response (`features[].geometry.coordinates`, ordered `[lon, lat]`)
/// and a flat JSON response (`format=json`, `results[].lat`/`lon`).
/// Both are supported because they fail differently and downstream
/// error messages depend on which one was used.
pub struct Geocoder {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl Geocoder {
    pub(crate) fn new(client: Client, config: &TravelConfig) -> Self {
        Self {
            client,
            api_key: config.geoapify_api_key.clone(),
            base_url: config.geoapify_base_url.clone(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/v1/geocode/search", self.base_url.trim_end_matches('/'))
    }

    fn api_key(&self) -> Result<&str, SearchError> {
        self.api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey { provider: "Geoapify" })
    }

    /// Resolve a city via the flat JSON response shape.
    pub async fn forward(&self, city: &str) -> Result<Coordinate, SearchError> {
        let api_key = self.api_key()?;
        debug!(city, "geocoding city");

        let resp = self
            .client
            .get(self.search_url())
            .query(&[("text", city), ("apiKey", api_key), ("format", "json")])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeJsonResponse = resp.json().await?;
        let first = body.results.into_iter().next().ok_or_else(|| {
            warn!(city, "no geocoding results");
            SearchError::NoGeocodeResult { city: city.to_string() }
        })?;

        debug!(city, lat = first.lat, lon = first.lon, "geocoded");
        Ok(Coordinate { lat: first.lat, lon: first.lon })
    }

    /// Resolve a city via the default GeoJSON response shape.
    pub async fn forward_geojson(&self, city: &str) -> Result<Coordinate, SearchError> {
        let api_key = self.api_key()?;
        debug!(city, "geocoding city");

        let resp = self
            .client
            .get(self.search_url())
            .query(&[("text", city), ("limit", "1"), ("apiKey", api_key)])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeGeoJsonResponse = resp.json().await?;
        let feature = body.features.into_iter().next().ok_or_else(|| {
            warn!(city, "no geocoding results");
            SearchError::NoGeocodeFeatures { city: city.to_string() }
        })?;

        // GeoJSON coordinates come as [lon, lat].
        match feature.geometry.coordinates.as_slice() {
            [lon, lat, ..] => {
                debug!(city, lat, lon, "geocoded");
                Ok(Coordinate { lat: *lat, lon: *lon })
            }
            _ => Err(SearchError::Decode {
                provider: "Geoapify",
                message: "geometry has fewer than two coordinates".to_string(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct GeocodeJsonResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct GeocodeGeoJsonResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Deserialize)]
struct GeocodeFeature {
    geometry: GeocodeGeometry,
}

#[derive(Deserialize)]
struct GeocodeGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}
