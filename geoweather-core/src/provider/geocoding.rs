use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    classify::{ClassifiedInput, DEFAULT_RESULT_LIMIT},
    config::ServiceConfig,
    error::GeocodingError,
    model::{GeocodingResult, ZipGeocodingResult},
    postal::matches_postal_format,
    validate::{ValidationError, parse_body, validate},
};

use super::Geocoder;

/// Upstream request a classified input turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodingQuery {
    /// `GET {base}zip?zip=<code>,<country>`
    Zip { code: String, country_code: String },
    /// `GET {base}direct?q=<query>&limit=<n>`
    Direct { query: String, limit: u8 },
    /// Coordinates are answered locally.
    Local { lat: f64, lon: f64 },
}

impl From<&ClassifiedInput> for GeocodingQuery {
    fn from(input: &ClassifiedInput) -> Self {
        let direct = |query: String| GeocodingQuery::Direct { query, limit: DEFAULT_RESULT_LIMIT };

        match input {
            ClassifiedInput::PostalCode { code, country_code } => GeocodingQuery::Zip {
                code: code.clone(),
                country_code: country_code.clone(),
            },
            ClassifiedInput::CityState { city, state, country_code } => {
                direct(format!("{city},{state},{country_code}"))
            }
            ClassifiedInput::CityCountry { city, country_code } => {
                direct(format!("{city},{country_code}"))
            }
            ClassifiedInput::FreeText { query } => direct(query.clone()),
            ClassifiedInput::Coordinates { lat, lon } => {
                GeocodingQuery::Local { lat: *lat, lon: *lon }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    config: ServiceConfig,
    http: Client,
}

impl GeocodingClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_http(config, Client::new())
    }

    pub fn with_http(config: ServiceConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Whether `input` looks like a postal code of `country_code`.
    pub fn is_postal_code(&self, input: &str, country_code: &str) -> bool {
        matches_postal_format(input, country_code)
    }

    /// Run a prepared query. At most one HTTP request is made.
    pub async fn execute(&self, query: &GeocodingQuery) -> Result<GeocodingResult, GeocodingError> {
        match query {
            GeocodingQuery::Zip { code, country_code } => self.by_zip(code, country_code).await,
            GeocodingQuery::Direct { query, limit } => self.by_query(query, *limit).await,
            GeocodingQuery::Local { lat, lon } => Ok(GeocodingResult::from_coordinates(*lat, *lon)),
        }
    }

    /// Look up a postal code. The `zip` field of the response is dropped.
    pub async fn by_zip(
        &self,
        code: &str,
        country_code: &str,
    ) -> Result<GeocodingResult, GeocodingError> {
        let zip = format!("{code},{country_code}");
        let raw = self.fetch("zip", &[("zip", zip.as_str())]).await?;

        let empty = match &raw {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            return Err(GeocodingError::NoResults { query: zip });
        }

        let validated: ZipGeocodingResult = validate(raw)?;
        Ok(validated.into())
    }

    /// Direct geocoding; only the first of up to `limit` results is returned.
    pub async fn by_query(&self, query: &str, limit: u8) -> Result<GeocodingResult, GeocodingError> {
        let limit = limit.to_string();
        let raw = self.fetch("direct", &[("q", query), ("limit", limit.as_str())]).await?;

        let first = match raw {
            Value::Array(items) => items.into_iter().next(),
            Value::Null => None,
            other => {
                return Err(ValidationError::new(
                    "geocoding result list",
                    format!("expected an array, got {}", json_type(&other)),
                )
                .into());
            }
        };

        let first = first.ok_or_else(|| GeocodingError::NoResults { query: query.to_string() })?;
        Ok(validate::<GeocodingResult>(first)?)
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, GeocodingError> {
        let url = format!("{}{endpoint}", self.config.geocoding_url());
        debug!(%url, ?params, "geocoding request");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.config.api_key())])
            .send()
            .await
            .map_err(GeocodingError::UpstreamUnavailable)?;

        let status = res.status();
        if !status.is_success() {
            return Err(GeocodingError::UpstreamHttp {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = res.text().await.map_err(GeocodingError::UpstreamUnavailable)?;
        Ok(parse_body(&body)?)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn resolve(&self, input: &ClassifiedInput) -> Result<GeocodingResult, GeocodingError> {
        let query = GeocodingQuery::from(input);
        let result = self.execute(&query).await;

        if let Err(err) = &result {
            warn!(kind = %err.kind(), input = input.label(), error = %err, "geocoding failed");
        }

        result
    }
}
