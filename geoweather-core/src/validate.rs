//! Shape checks for upstream JSON.
//!
//! Responses are decoded into [`serde_json::Value`] first and then checked
//! against a named [`Shape`], so a mismatch is reported as a
//! [`ValidationError`] carrying serde's diagnostic instead of a generic decode
//! failure.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::{
    error::ApiErrorCode,
    model::{GeocodingResult, OneCallResponse, ZipGeocodingResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (expected {shape})")]
pub struct ValidationError {
    pub shape: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(shape: &'static str, message: impl Into<String>) -> Self {
        Self { shape, message: message.into() }
    }
}

/// A response type that upstream JSON can be validated against.
pub trait Shape: DeserializeOwned {
    /// Human-readable name used in diagnostics.
    const NAME: &'static str;
}

impl Shape for GeocodingResult {
    const NAME: &'static str = "geocoding result";
}

impl Shape for ZipGeocodingResult {
    const NAME: &'static str = "zip geocoding result";
}

impl Shape for OneCallResponse {
    const NAME: &'static str = "one-call response";
}

/// Body of a One Call error response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiErrorBody {
    pub cod: ApiErrorCode,
    pub message: String,
}

impl Shape for ApiErrorBody {
    const NAME: &'static str = "api error";
}

/// Check `raw` against `T`, field presence and primitive types included.
pub fn validate<T: Shape>(raw: Value) -> Result<T, ValidationError> {
    serde_json::from_value(raw).map_err(|e| ValidationError::new(T::NAME, e.to_string()))
}

/// Decode a response body into JSON without committing to a shape.
pub fn parse_body(body: &str) -> Result<Value, ValidationError> {
    serde_json::from_str(body).map_err(|e| ValidationError::new("JSON document", e.to_string()))
}

/// A One Call body is either weather data or an error object.
#[derive(Debug, Clone)]
pub enum OneCallPayload {
    Success(Box<OneCallResponse>),
    Failure(ApiErrorBody),
}

impl OneCallPayload {
    /// Objects carrying both `cod` and `message` are errors; everything else must be weather data.
    pub fn from_value(raw: Value) -> Result<Self, ValidationError> {
        let is_error = raw
            .as_object()
            .is_some_and(|obj| obj.contains_key("cod") && obj.contains_key("message"));

        if is_error {
            validate::<ApiErrorBody>(raw).map(OneCallPayload::Failure)
        } else {
            validate::<OneCallResponse>(raw).map(|data| OneCallPayload::Success(Box::new(data)))
        }
    }
}
