use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::air_quality::AirQuality;
use crate::config::DashboardConfig;
use crate::error::FetchError;

/// Where city readings come from. One call is one upstream request; nothing
/// is cached between calls.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<AirQuality, FetchError>;
}

#[derive(Deserialize)]
struct Envelope {
    status: Option<String>,
    #[serde(default)]
    data: Value,
}

/// Decodes a feed response body. Only `"status": "ok"` yields a reading.
pub fn decode_feed(body: &[u8]) -> Result<AirQuality, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    match envelope.status.as_deref() {
        Some("ok") => Ok(serde_json::from_value(envelope.data)?),
        status => Err(FetchError::Status {
            status: status.unwrap_or("missing").to_string(),
            detail: match envelope.data {
                Value::String(message) => message,
                Value::Null => "no detail".to_string(),
                other => other.to_string(),
            },
        }),
    }
}

/// Client for the World Air Quality Index city feed.
pub struct WaqiClient {
    client: Client,
    base: Url,
    token: String,
}

impl WaqiClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        let base = Url::parse(&config.feed_base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.feed_base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.feed_base_url.clone()));
        }

        Ok(WaqiClient {
            client: Client::new(),
            base,
            token: config.waqi_token.clone(),
        })
    }

    /// `{base}/{city}/?token={token}`, with the city encoded as one path segment.
    pub fn feed_url(&self, city: &str) -> Result<Url, FetchError> {
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(city)
            .push("");
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }
}

#[async_trait]
impl FeedSource for WaqiClient {
    async fn fetch(&self, city: &str) -> Result<AirQuality, FetchError> {
        let url = self.feed_url(city)?;
        tracing::debug!("requesting air quality feed for {}", city);

        let body = self.client.get(url).send().await?.bytes().await?;
        let reading = decode_feed(&body)?;

        tracing::debug!("{} reports aqi {} with {} readings", city, reading.aqi, reading.iaqi.len());
        Ok(reading)
    }
}
