const GEOAPIFY_API_BASE: &str = "https://api.geoapify.com";
const OPENTRIPMAP_API_BASE: &str = "https://api.opentripmap.com";

/// Credentials and endpoints for the travel data providers.
///
/// Built once at startup and passed by reference to the finder
/// constructors. Keys are optional here; a finder called without the
/// key it needs reports the problem as an error result instead of
/// touching the network.
#[derive(Debug, Clone)]
pub struct TravelConfig {
    pub geoapify_api_key: Option<String>,
    pub opentripmap_api_key: Option<String>,
    pub geoapify_base_url: String,
    pub opentripmap_base_url: String,
}

impl TravelConfig {
    pub fn new(
        geoapify_api_key: Option<String>,
        opentripmap_api_key: Option<String>,
    ) -> Self {
        Self {
            geoapify_api_key,
            opentripmap_api_key,
            geoapify_base_url: GEOAPIFY_API_BASE.to_string(),
            opentripmap_base_url: OPENTRIPMAP_API_BASE.to_string(),
        }
    }

    /// Read `GEOAPIFY_API_KEY` and `OPENTRIPMAP_API_KEY` from the
    /// environment. Empty values count as missing.
    pub fn from_env() -> Self {
        Self::new(env_nonempty("GEOAPIFY_API_KEY"), env_nonempty("OPENTRIPMAP_API_KEY"))
    }

    #[must_use]
    pub fn with_geoapify_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.geoapify_base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_opentripmap_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opentripmap_base_url = base_url.into();
        self
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
