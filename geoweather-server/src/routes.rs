use std::{str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use geoweather_core::{
    ClassifiedInput, GeocodingClient, GeocodingResult, Geocoder, OneCallClient, Section,
    ServiceConfig, Units, WeatherProvider, parse_coordinates,
    provider::{DEFAULT_FORECAST_DAYS, DEFAULT_FORECAST_HOURS},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    config: Arc<ServiceConfig>,
}

/// Build the Axum application with routes and middleware
pub fn build_app(config: ServiceConfig) -> Router {
    let state = AppState { config: Arc::new(config) };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/geocoding", get(geocoding))
        .route("/api/geocode", get(geocode))
        .route("/api/weather", get(weather))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_param<T>(value: Option<&str>, name: &str) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| v.parse::<T>().map_err(|e| ApiError::BadRequest(format!("Invalid {name}: {e}"))))
        .transpose()
}

#[derive(Debug, Deserialize)]
struct GeocodingParams {
    q: Option<String>,
}

/// Free-form lookup: the input is classified, then resolved.
async fn geocoding(
    State(state): State<AppState>,
    Query(params): Query<GeocodingParams>,
) -> Result<Json<GeocodingResult>, ApiError> {
    let query = params
        .q
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter".to_string()))?;

    let geocoder = GeocodingClient::new(state.config.as_ref().clone());
    let location = geocoder.locate(&query).await?;

    tracing::info!(query = %query, name = %location.name, "resolved location");
    Ok(Json(location))
}

#[derive(Debug, Deserialize)]
struct GeocodeParams {
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    coordinates: Option<String>,
    zip: Option<String>,
}

impl GeocodeParams {
    /// Structured parameters, checked in order: coordinates, city, zip.
    fn into_input(self) -> Result<ClassifiedInput, ApiError> {
        let country = non_blank(self.country)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_else(|| "US".to_string());

        if let Some(coordinates) = self.coordinates {
            let (lat, lon) = parse_coordinates(&coordinates)
                .ok_or_else(|| ApiError::BadRequest("Invalid coordinates format".to_string()))?;
            return Ok(ClassifiedInput::Coordinates { lat, lon });
        }

        if let Some(city) = non_blank(self.city) {
            return Ok(match non_blank(self.state) {
                Some(state) => ClassifiedInput::CityState { city, state, country_code: country },
                None => ClassifiedInput::CityCountry { city, country_code: country },
            });
        }

        if let Some(code) = non_blank(self.zip) {
            return Ok(ClassifiedInput::PostalCode { code, country_code: country });
        }

        Err(ApiError::BadRequest("Missing location parameters".to_string()))
    }
}

/// Structured lookup by coordinates, city/state/country or zip.
async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodingResult>, ApiError> {
    let input = params.into_input()?;

    let geocoder = GeocodingClient::new(state.config.as_ref().clone());
    let location = geocoder.resolve(&input).await?;

    Ok(Json(location))
}

/// `q` selector of the weather route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeatherView {
    All,
    Current,
    Daily,
    Hourly,
}

impl FromStr for WeatherView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(WeatherView::All),
            "current" => Ok(WeatherView::Current),
            "daily" => Ok(WeatherView::Daily),
            "hourly" => Ok(WeatherView::Hourly),
            other => Err(format!("'{other}', expected one of all, current, daily, hourly")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    lat: Option<String>,
    lon: Option<String>,
    units: Option<String>,
    exclude: Option<String>,
    q: Option<String>,
    days: Option<String>,
    hours: Option<String>,
}

async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Response, ApiError> {
    let (Some(lat), Some(lon)) = (non_blank(params.lat), non_blank(params.lon)) else {
        return Err(ApiError::BadRequest("Missing latitude or longitude parameters".to_string()));
    };
    let lat: f64 = parse_param(Some(lat.as_str()), "latitude")?.unwrap_or_default();
    let lon: f64 = parse_param(Some(lon.as_str()), "longitude")?.unwrap_or_default();

    let units = parse_param::<Units>(params.units.as_deref(), "units")?.unwrap_or(Units::Imperial);
    let view = parse_param::<WeatherView>(params.q.as_deref(), "q")?.unwrap_or(WeatherView::All);
    let days = parse_param::<usize>(params.days.as_deref(), "days")?.unwrap_or(DEFAULT_FORECAST_DAYS);
    let hours =
        parse_param::<usize>(params.hours.as_deref(), "hours")?.unwrap_or(DEFAULT_FORECAST_HOURS);
    let exclude = params
        .exclude
        .as_deref()
        .map(Section::parse_list)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .unwrap_or_default();

    let client = OneCallClient::new(state.config.as_ref().clone().with_units(units));

    let response = match view {
        WeatherView::All => Json(client.complete_weather(lat, lon, &exclude).await?).into_response(),
        WeatherView::Current => Json(client.current_weather(lat, lon).await?).into_response(),
        WeatherView::Daily => Json(client.daily_forecast(lat, lon, days).await?).into_response(),
        WeatherView::Hourly => Json(client.hourly_forecast(lat, lon, hours).await?).into_response(),
    };

    Ok(response)
}
