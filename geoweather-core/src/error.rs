use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{config::ConfigError, validate::ValidationError};

/// Coarse failure category shared by geocoding and weather errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    EmptyInput,
    UpstreamHttp,
    UpstreamApi,
    NoResults,
    InvalidResponseShape,
    UpstreamUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::UpstreamHttp => "upstream_http",
            ErrorKind::UpstreamApi => "upstream_api",
            ErrorKind::NoResults => "no_results",
            ErrorKind::InvalidResponseShape => "invalid_response_shape",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Please enter a location")]
    EmptyInput,

    #[error("API request failed with status: {status} {status_text}")]
    UpstreamHttp { status: u16, status_text: String },

    #[error("No results found for query: {query}")]
    NoResults { query: String },

    #[error("Invalid response format: {0}")]
    InvalidResponseShape(#[from] ValidationError),

    #[error("Geocoding request failed: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),
}

impl GeocodingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeocodingError::Config(_) => ErrorKind::Configuration,
            GeocodingError::EmptyInput => ErrorKind::EmptyInput,
            GeocodingError::UpstreamHttp { .. } => ErrorKind::UpstreamHttp,
            GeocodingError::NoResults { .. } => ErrorKind::NoResults,
            GeocodingError::InvalidResponseShape(_) => ErrorKind::InvalidResponseShape,
            GeocodingError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
        }
    }

    /// HTTP status reported by the provider, if the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GeocodingError::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error code carried by a One Call error body; the API sends it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ApiErrorCode {
    Number(i64),
    Text(String),
}

impl ApiErrorCode {
    /// The code as an HTTP status, when it is one.
    pub fn as_status(&self) -> Option<u16> {
        let code = match self {
            ApiErrorCode::Number(n) => u16::try_from(*n).ok()?,
            ApiErrorCode::Text(s) => s.trim().parse().ok()?,
        };
        (100..=599).contains(&code).then_some(code)
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorCode::Number(n) => write!(f, "{n}"),
            ApiErrorCode::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API request failed with status {status}: {message}")]
    UpstreamHttp { status: u16, message: String },

    #[error("API Error: {message} (code {code})")]
    Api { code: ApiErrorCode, message: String },

    #[error("Invalid weather response: {0}")]
    InvalidResponseShape(#[from] ValidationError),

    #[error("Weather request failed: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::UpstreamHttp { .. } => ErrorKind::UpstreamHttp,
            WeatherError::Api { .. } => ErrorKind::UpstreamApi,
            WeatherError::InvalidResponseShape(_) => ErrorKind::InvalidResponseShape,
            WeatherError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            WeatherError::UpstreamHttp { status, .. } => Some(*status),
            WeatherError::Api { code, .. } => code.as_status(),
            _ => None,
        }
    }
}
