use thiserror::Error;

/// Everything that can go wrong between asking the feed for a city and
/// holding a decoded reading. All of these render the same way for the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("city name is empty")]
    EmptyCity,

    #[error("invalid feed url '{0}'")]
    InvalidUrl(String),

    #[error("request to the air quality feed failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode the air quality feed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("air quality feed answered with status '{status}': {detail}")]
    Status { status: String, detail: String },
}
