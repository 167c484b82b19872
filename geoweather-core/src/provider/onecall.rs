use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::ServiceConfig,
    error::WeatherError,
    model::{OneCallResponse, Section},
    validate::{OneCallPayload, parse_body},
};

use super::WeatherProvider;

/// Client for the One Call 3.0 endpoint.
#[derive(Debug, Clone)]
pub struct OneCallClient {
    config: ServiceConfig,
    http: Client,
}

impl OneCallClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_http(config, Client::new())
    }

    pub fn with_http(config: ServiceConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Query parameters for one request, without the API key.
    pub fn query_params(&self, lat: f64, lon: f64, exclude: &[Section]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", self.config.units().as_str().to_string()),
            ("lang", self.config.language().to_string()),
        ];
        if !exclude.is_empty() {
            params.push(("exclude", Section::join(exclude)));
        }
        params
    }

    async fn request(
        &self,
        lat: f64,
        lon: f64,
        exclude: &[Section],
    ) -> Result<OneCallResponse, WeatherError> {
        let params = self.query_params(lat, lon, exclude);
        debug!(url = self.config.onecall_url(), ?params, "one call request");

        let res = self
            .http
            .get(self.config.onecall_url())
            .query(&params)
            .query(&[("appid", self.config.api_key())])
            .send()
            .await
            .map_err(WeatherError::UpstreamUnavailable)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::UpstreamUnavailable)?;

        if !status.is_success() {
            let message = parse_body(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| {
                    format!("API Error: {}", status.canonical_reason().unwrap_or("unknown status"))
                });
            return Err(WeatherError::UpstreamHttp { status: status.as_u16(), message });
        }

        match OneCallPayload::from_value(parse_body(&body)?)? {
            OneCallPayload::Success(data) => Ok(*data),
            OneCallPayload::Failure(err) => {
                Err(WeatherError::Api { code: err.cod, message: err.message })
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OneCallClient {
    async fn fetch_snapshot(
        &self,
        lat: f64,
        lon: f64,
        exclude: &[Section],
    ) -> Result<OneCallResponse, WeatherError> {
        let result = self.request(lat, lon, exclude).await;

        if let Err(err) = &result {
            error!(lat, lon, kind = %err.kind(), error = %err, "Error fetching weather data");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;

    #[test]
    fn query_params_include_units_and_language() {
        let config = ServiceConfig::new("KEY")
            .unwrap()
            .with_units(Units::Imperial)
            .with_language("de");
        let client = OneCallClient::new(config);

        let params = client.query_params(40.5, -74.25, &[]);
        assert_eq!(
            params,
            vec![
                ("lat", "40.5".to_string()),
                ("lon", "-74.25".to_string()),
                ("units", "imperial".to_string()),
                ("lang", "de".to_string()),
            ]
        );
    }

    #[test]
    fn query_params_join_exclude_list() {
        let client = OneCallClient::new(ServiceConfig::new("KEY").unwrap());
        let params = client.query_params(1.0, 2.0, &Section::all_except(Section::Current));
        assert_eq!(params.last(), Some(&("exclude", "minutely,hourly,daily,alerts".to_string())));
        assert!(params.iter().all(|(name, _)| *name != "appid"));
    }
}
