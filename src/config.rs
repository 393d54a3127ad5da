use std::fmt;

use serde::Deserialize;

pub const DEFAULT_FEED_BASE_URL: &str = "http://api.waqi.info/feed";

pub const DEFAULT_CITIES: [&str; 20] = [
    "Mumbai",
    "Chennai",
    "Delhi",
    "Hyderabad",
    "Bangalore",
    "Kolkata",
    "Ahmedabad",
    "Pune",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Visakhapatnam",
    "Bhopal",
    "Patna",
    "Ludhiana",
    "Agra",
    "Nashik",
    "Faridabad",
    "Meerut",
];

/// Settings read from Rocket's figment (`Rocket.toml`, `ROCKET_*` env vars).
///
/// `waqi_token` has no default: the access token is supplied at deploy time,
/// e.g. `ROCKET_WAQI_TOKEN=...`.
#[derive(Clone, Deserialize)]
pub struct DashboardConfig {
    pub waqi_token: String,
    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: String,
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
}

fn default_feed_base_url() -> String {
    DEFAULT_FEED_BASE_URL.to_string()
}

fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
}

impl DashboardConfig {
    #[cfg(test)]
    pub fn with_token(token: &str) -> Self {
        DashboardConfig {
            waqi_token: token.to_string(),
            feed_base_url: default_feed_base_url(),
            cities: default_cities(),
        }
    }

    /// The city shown when the request names none.
    pub fn default_city(&self) -> Option<&str> {
        self.cities.first().map(String::as_str)
    }

    pub fn find_city(&self, name: &str) -> Option<&str> {
        self.cities
            .iter()
            .find(|c| c.as_str() == name)
            .map(String::as_str)
    }
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("waqi_token", &"<redacted>")
            .field("feed_base_url", &self.feed_base_url)
            .field("cities", &self.cities)
            .finish()
    }
}
