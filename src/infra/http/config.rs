const DEFAULT_API_BASE_URL: &str = "https://fleet-api.example.com/api";
const DEFAULT_API_KEY: &str = "4f81c29ab7d04e5f9b63d21c84a0e7f2517390d846ab12";

/// Transport configuration. The base URL and the static API key are the only
/// configurable values; everything else rides on transport defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FLEET_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            api_key: std::env::var("FLEET_API_KEY")
                .unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}
