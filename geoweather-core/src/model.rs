//! Shared domain models: geocoding results and One Call weather data.

pub mod geocoding;
pub mod weather;

pub use geocoding::{GeocodingResult, ZipGeocodingResult};
pub use weather::{
    Alert, CurrentWeather, Daily, DayFeelsLike, DayTemp, Hourly, Minutely, OneCallResponse,
    Precipitation, Section, UnknownSection, WeatherCondition,
};
