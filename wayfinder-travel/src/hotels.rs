use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::config::TravelConfig;
use crate::error::SearchError;
use crate::geocode::Geocoder;

/// Search radius used when the caller does not give one, in meters.
pub const DEFAULT_RADIUS_M: u32 = 5000;
/// Result cap used when the caller does not give one.
pub const DEFAULT_LIMIT: u32 = 10;

const ACCOMMODATION_CATEGORIES: &str =
    "accommodation.hotel,accommodation.hostel,accommodation.apartment";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One accommodation option from the Geoapify Places API.
///
/// `raw` keeps the full property set the provider returned so the model
/// can surface details (stars, amenities) the typed fields do not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub price: Option<Value>,
    pub rating: Option<Value>,
    pub raw: Value,
}

/// Outcome of a hotel search, tagged for direct consumption by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HotelSearchResult {
    Success { hotels: Vec<HotelRecord> },
    Error { error_message: String },
}

/// Accommodation search over the Geoapify Places API.
pub struct HotelFinder {
    client: Client,
    geocoder: Geocoder,
    api_key: Option<String>,
    base_url: String,
}

impl HotelFinder {
    pub fn new(config: &TravelConfig) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            geocoder: Geocoder::new(client.clone(), config),
            client,
            api_key: config.geoapify_api_key.clone(),
            base_url: config.geoapify_base_url.clone(),
        })
    }

    /// Search for accommodation around a city center. Never fails; any
    /// problem is reported through the error variant of the result.
    pub async fn search(&self, city: &str, radius_m: u32, limit: u32) -> HotelSearchResult {
        info!(city, radius_m, limit, "searching hotels");
        match self.try_search(city, radius_m, limit).await {
            Ok(hotels) => {
                info!(count = hotels.len(), "hotel search succeeded");
                HotelSearchResult::Success { hotels }
            }
            Err(e) => {
                error!(error = %e, "hotel search failed");
                HotelSearchResult::Error { error_message: e.to_string() }
            }
        }
    }

    async fn try_search(
        &self,
        city: &str,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<HotelRecord>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey { provider: "Geoapify" })?;

        let center = self.geocoder.forward_geojson(city).await?;

        let filter = format!("circle:{},{},{}", center.lon, center.lat, radius_m);
        let limit = limit.to_string();
        let resp = self
            .client
            .get(format!("{}/v2/places", self.base_url.trim_end_matches('/')))
            .query(&[
                ("apiKey", api_key),
                ("categories", ACCOMMODATION_CATEGORIES),
                ("filter", filter.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: PlacesResponse = resp.json().await?;
        Ok(body.features.into_iter().map(HotelRecord::from_feature).collect())
    }
}

impl HotelRecord {
    fn from_feature(feature: PlaceFeature) -> Self {
        let props = feature.properties;
        let coords = feature.geometry.map(|g| g.coordinates).unwrap_or_default();
        Self {
            name: props
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unnamed hotel")
                .to_string(),
            address: props
                .get("formatted")
                .and_then(Value::as_str)
                .unwrap_or("Address not available")
                .to_string(),
            lat: coords.get(1).copied(),
            lon: coords.first().copied(),
            price: props.get("rate").filter(|v| !v.is_null()).cloned(),
            rating: props.get("rating").filter(|v| !v.is_null()).cloned(),
            raw: props,
        }
    }
}

#[derive(Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Deserialize)]
struct PlaceFeature {
    #[serde(default)]
    properties: Value,
    geometry: Option<PlaceGeometry>,
}

#[derive(Deserialize)]
struct PlaceGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}
