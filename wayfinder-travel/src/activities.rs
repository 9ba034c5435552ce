use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::config::TravelConfig;
use crate::error::SearchError;
use crate::geocode::Geocoder;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One point of interest from the OpenTripMap radius search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub kinds: Option<String>,
    pub rate: Option<Value>,
    pub xid: Option<String>,
    pub raw: Value,
}

/// Outcome of an activity search, tagged for direct consumption by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActivitySearchResult {
    Success { activities: Vec<ActivityRecord> },
    Error { error_message: String },
}

/// Points-of-interest search over the OpenTripMap API. Destinations are
/// resolved to coordinates through Geoapify first.
pub struct ActivityFinder {
    client: Client,
    geocoder: Geocoder,
    api_key: Option<String>,
    base_url: String,
}

impl ActivityFinder {
    pub fn new(config: &TravelConfig) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            geocoder: Geocoder::new(client.clone(), config),
            client,
            api_key: config.opentripmap_api_key.clone(),
            base_url: config.opentripmap_base_url.clone(),
        })
    }

    /// Search for activities around a city. `kinds` narrows the search to
    /// comma-separated OpenTripMap categories; `None` means any kind.
    /// Never fails; any problem is reported through the error variant.
    pub async fn search(
        &self,
        city: &str,
        kinds: Option<&str>,
        radius_m: u32,
        limit: u32,
    ) -> ActivitySearchResult {
        info!(city, kinds, radius_m, limit, "searching activities");
        match self.try_search(city, kinds, radius_m, limit).await {
            Ok(activities) => {
                info!(count = activities.len(), "activity search succeeded");
                ActivitySearchResult::Success { activities }
            }
            Err(e) => {
                error!(error = %e, "activity search failed");
                ActivitySearchResult::Error { error_message: e.to_string() }
            }
        }
    }

    async fn try_search(
        &self,
        city: &str,
        kinds: Option<&str>,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<ActivityRecord>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey { provider: "OpenTripMap" })?;

        let center = self
            .geocoder
            .forward(city)
            .await
            .map_err(|e| SearchError::GeocodeFailed(Box::new(e)))?;

        let radius = radius_m.to_string();
        let limit = limit.to_string();
        let lat = center.lat.to_string();
        let lon = center.lon.to_string();
        let mut query = vec![
            ("apikey", api_key),
            ("radius", radius.as_str()),
            ("limit", limit.as_str()),
            ("lon", lon.as_str()),
            ("lat", lat.as_str()),
            ("format", "json"),
        ];
        if let Some(kinds) = kinds.filter(|k| !k.is_empty()) {
            query.push(("kinds", kinds));
        }

        let resp = self
            .client
            .get(format!(
                "{}/0.1/en/places/radius",
                self.base_url.trim_end_matches('/')
            ))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let body: Vec<Value> = resp.json().await?;
        Ok(body.into_iter().map(ActivityRecord::from_place).collect())
    }
}

impl ActivityRecord {
    fn from_place(place: Value) -> Self {
        let point = place.get("point");
        Self {
            name: place.get("name").and_then(Value::as_str).map(str::to_string),
            lat: point.and_then(|p| p.get("lat")).and_then(Value::as_f64),
            lon: point.and_then(|p| p.get("lon")).and_then(Value::as_f64),
            kinds: place.get("kinds").and_then(Value::as_str).map(str::to_string),
            rate: place.get("rate").filter(|v| !v.is_null()).cloned(),
            xid: place.get("xid").and_then(Value::as_str).map(str::to_string),
            raw: place,
        }
    }
}
