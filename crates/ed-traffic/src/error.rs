//! Traffic lookup error type.

use thiserror::Error;

/// Reasons a speed lookup produced no usable value.
///
/// None of these are fatal to a dispatch run: callers degrade the affected
/// vehicle or heatmap point to "speed unknown".
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("traffic API key is missing")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("traffic service returned HTTP {0}")]
    Status(u16),

    #[error("malformed traffic response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("traffic response has no {0} field")]
    MissingField(&'static str),

    #[error("traffic service reported an invalid speed: {0}")]
    InvalidSpeed(f64),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
