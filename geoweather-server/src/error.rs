use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geoweather_core::{ErrorKind, GeocodingError, WeatherError};

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Geocoding(GeocodingError),
    Weather(WeatherError),
}

impl From<GeocodingError> for ApiError {
    fn from(err: GeocodingError) -> Self {
        ApiError::Geocoding(err)
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError::Weather(err)
    }
}

/// Response status for a failed upstream-backed lookup.
pub fn status_for(kind: ErrorKind, upstream: Option<u16>) -> StatusCode {
    match kind {
        ErrorKind::EmptyInput => StatusCode::BAD_REQUEST,
        ErrorKind::NoResults => StatusCode::NOT_FOUND,
        ErrorKind::UpstreamHttp | ErrorKind::UpstreamApi => upstream
            .and_then(|s| StatusCode::from_u16(s).ok())
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ErrorKind::InvalidResponseShape => StatusCode::BAD_GATEWAY,
        ErrorKind::UpstreamUnavailable | ErrorKind::Configuration => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, None, msg),
            ApiError::Geocoding(err) => {
                (status_for(err.kind(), err.upstream_status()), Some(err.kind()), err.to_string())
            }
            ApiError::Weather(err) => {
                (status_for(err.kind(), err.upstream_status()), Some(err.kind()), err.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(%status, ?kind, "{message}");
        } else {
            tracing::warn!(%status, ?kind, "{message}");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
