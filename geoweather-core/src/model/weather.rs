//! One Call 3.0 payload.
//!
//! Temperatures are Kelvin, Celsius or Fahrenheit and wind speeds m/s or mph
//! depending on the [`Units`](crate::config::Units) the request was made with.
//! See <https://openweathermap.org/api/one-call-3>.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

/// Top-level section of a One Call response that can be excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Current,
    Minutely,
    Hourly,
    Daily,
    Alerts,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown weather section '{0}'. Supported sections: current, minutely, hourly, daily, alerts.")]
pub struct UnknownSection(pub String);

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Current => "current",
            Section::Minutely => "minutely",
            Section::Hourly => "hourly",
            Section::Daily => "daily",
            Section::Alerts => "alerts",
        }
    }

    pub const fn all() -> &'static [Section] {
        &[Section::Current, Section::Minutely, Section::Hourly, Section::Daily, Section::Alerts]
    }

    /// Exclude list that keeps only `keep`.
    pub fn all_except(keep: Section) -> Vec<Section> {
        Section::all().iter().copied().filter(|s| *s != keep).collect()
    }

    /// Parse a comma-separated list such as `"minutely,alerts"`. Blank items are skipped.
    pub fn parse_list(csv: &str) -> Result<Vec<Section>, UnknownSection> {
        csv.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn join(sections: &[Section]) -> String {
        sections.iter().map(Section::as_str).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(Section::Current),
            "minutely" => Ok(Section::Minutely),
            "hourly" => Ok(Section::Hourly),
            "daily" => Ok(Section::Daily),
            "alerts" => Ok(Section::Alerts),
            _ => Err(UnknownSection(s.to_string())),
        }
    }
}

/// Weather condition entry (`weather[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    /// Group of weather parameters (Rain, Snow, Clouds etc.)
    pub main: String,
    pub description: String,
    /// Icon id such as `"10d"`.
    pub icon: String,
}

/// Precipitation volume for the last hour, mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h")]
    pub one_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub dt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
    pub temp: f64,
    pub feels_like: f64,
    /// Sea-level pressure, hPa.
    pub pressure: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: f64,
    /// Average visibility in metres, capped at 10 km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl CurrentWeather {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }

    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        self.sunrise.and_then(unix_to_utc)
    }

    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        self.sunset.and_then(unix_to_utc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minutely {
    pub dt: i64,
    /// mm/h
    pub precipitation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hourly {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    /// Probability of precipitation, 0..=1.
    pub pop: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl Hourly {
    pub fn forecast_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTemp {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayFeelsLike {
    pub day: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Daily {
    pub dt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
    pub moonrise: i64,
    pub moonset: i64,
    pub moon_phase: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub temp: DayTemp,
    pub feels_like: DayFeelsLike,
    pub pressure: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub clouds: f64,
    pub pop: f64,
    /// Daily volume, mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<f64>,
    pub uvi: f64,
}

impl Daily {
    pub fn forecast_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

/// National weather alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub sender_name: String,
    pub event: String,
    pub start: i64,
    pub end: i64,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Alert {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.start)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.end)
    }
}

/// Combined One Call payload. Excluded sections are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneCallResponse {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    /// Shift in seconds from UTC.
    pub timezone_offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentWeather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutely: Option<Vec<Minutely>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Vec<Hourly>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<Daily>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
}
