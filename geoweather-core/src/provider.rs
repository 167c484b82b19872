use crate::{
    classify::{ClassifiedInput, classify},
    error::{GeocodingError, WeatherError},
    model::{CurrentWeather, Daily, GeocodingResult, Hourly, OneCallResponse, Section},
    validate::{Shape, ValidationError},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod geocoding;
pub mod onecall;

pub use geocoding::{GeocodingClient, GeocodingQuery};
pub use onecall::OneCallClient;

pub const DEFAULT_FORECAST_DAYS: usize = 7;
pub const DEFAULT_FORECAST_HOURS: usize = 24;

/// Turns classified input into a single location.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, input: &ClassifiedInput) -> Result<GeocodingResult, GeocodingError>;

    /// Classify raw text, then resolve it.
    async fn locate(&self, input: &str) -> Result<GeocodingResult, GeocodingError> {
        let classified = classify(input)?;
        self.resolve(&classified).await
    }
}

/// Source of One Call weather data.
///
/// Implementors provide [`fetch_snapshot`](Self::fetch_snapshot); the section
/// accessors each make one call that excludes everything they don't return.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_snapshot(
        &self,
        lat: f64,
        lon: f64,
        exclude: &[Section],
    ) -> Result<OneCallResponse, WeatherError>;

    async fn current_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        let data = self.fetch_snapshot(lat, lon, &Section::all_except(Section::Current)).await?;
        data.current.ok_or_else(|| {
            ValidationError::new(OneCallResponse::NAME, "missing field `current`").into()
        })
    }

    /// First `days` daily entries; empty when the response has none.
    async fn daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        days: usize,
    ) -> Result<Vec<Daily>, WeatherError> {
        let data = self.fetch_snapshot(lat, lon, &Section::all_except(Section::Daily)).await?;
        Ok(first_n(data.daily, days))
    }

    /// First `hours` hourly entries; empty when the response has none.
    async fn hourly_forecast(
        &self,
        lat: f64,
        lon: f64,
        hours: usize,
    ) -> Result<Vec<Hourly>, WeatherError> {
        let data = self.fetch_snapshot(lat, lon, &Section::all_except(Section::Hourly)).await?;
        Ok(first_n(data.hourly, hours))
    }

    async fn complete_weather(
        &self,
        lat: f64,
        lon: f64,
        exclude: &[Section],
    ) -> Result<OneCallResponse, WeatherError> {
        self.fetch_snapshot(lat, lon, exclude).await
    }
}

fn first_n<T>(items: Option<Vec<T>>, n: usize) -> Vec<T> {
    let mut items = items.unwrap_or_default();
    items.truncate(n);
    items
}
