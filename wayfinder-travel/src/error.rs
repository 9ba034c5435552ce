use thiserror::Error;

/// Failure modes of a travel data lookup.
///
/// These never cross a finder's public boundary as `Err`; the finders
/// render them into the `error_message` of a tagged error result.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A required credential was absent. Raised before any request is sent.
    #[error("Missing {provider} API key")]
    MissingApiKey { provider: &'static str },

    /// The GeoJSON geocoding endpoint returned no features for the city.
    #[error("Could not geocode city: {city}")]
    NoGeocodeFeatures { city: String },

    /// The JSON geocoding endpoint returned no results for the city.
    #[error("No geocoding result for city: {city}")]
    NoGeocodeResult { city: String },

    /// Activity search could not resolve the destination.
    #[error("Failed to geocode city: {0}")]
    GeocodeFailed(#[source] Box<SearchError>),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The provider answered 2xx with a body we could not make sense of.
    #[error("Unexpected {provider} response: {message}")]
    Decode { provider: &'static str, message: String },
}
