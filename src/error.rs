use std::time::Duration;
use thiserror::Error;

/// Failure to resolve a playlist through a metadata provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid playlist reference: {0}")]
    InvalidReference(String),

    #[error("Playlist not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Extractor failed: {0}")]
    Extractor(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Extractor(err.to_string())
    }
}

/// User-visible failures of an estimate query.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Invalid Playlist URL")]
    InvalidPlaylistReference(#[source] FetchError),

    #[error("Invalid choice. Please select an option.")]
    InvalidMode(String),

    #[error("Playback speed must be a positive number (got '{0}')")]
    InvalidSpeed(String),

    #[error("Daily hours must be a number (got {0})")]
    InvalidDailyHours(f64),
}

impl From<FetchError> for EstimateError {
    fn from(err: FetchError) -> Self {
        EstimateError::InvalidPlaylistReference(err)
    }
}
