//! Core library for `geoweather`.
//!
//! This crate defines:
//! - Postal code formats and classification of free-form location input
//! - Geocoding and One Call weather clients for OpenWeatherMap
//! - Validation of upstream JSON against the expected shapes
//! - Configuration & credentials handling
//!
//! It is used by `geoweather-cli` and `geoweather-server`.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod postal;
pub mod provider;
pub mod validate;

pub use classify::{ClassifiedInput, classify, parse_coordinates};
pub use config::{Config, ConfigError, ServiceConfig, Units};
pub use error::{ErrorKind, GeocodingError, WeatherError};
pub use model::{GeocodingResult, OneCallResponse, Section};
pub use postal::matches_postal_format;
pub use provider::{GeocodingClient, Geocoder, OneCallClient, WeatherProvider};
pub use validate::ValidationError;
