//! Plain-text rendering of lookups and weather data.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use geoweather_core::{
    ClassifiedInput, GeocodingResult, OneCallResponse, Units,
    model::{CurrentWeather, Daily, Hourly, WeatherCondition},
};

fn local(ts: Option<DateTime<Utc>>, offset_secs: i64, fmt: &str) -> String {
    let offset = i32::try_from(offset_secs)
        .ok()
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    ts.map(|t| t.with_timezone(&offset).format(fmt).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn conditions(weather: &[WeatherCondition]) -> String {
    if weather.is_empty() {
        return "Unknown".to_string();
    }
    weather.iter().map(|w| w.description.as_str()).collect::<Vec<_>>().join(", ")
}

/// First `n` entries of an optional forecast list.
pub fn leading<T>(items: &Option<Vec<T>>, n: usize) -> &[T] {
    items.as_deref().map(|list| &list[..n.min(list.len())]).unwrap_or(&[])
}

pub fn classification(input: &ClassifiedInput) -> String {
    let detail = match input {
        ClassifiedInput::PostalCode { code, country_code } => {
            format!("code={code} country={country_code}")
        }
        ClassifiedInput::CityState { city, state, country_code } => {
            format!("city={city} state={state} country={country_code}")
        }
        ClassifiedInput::CityCountry { city, country_code } => {
            format!("city={city} country={country_code}")
        }
        ClassifiedInput::Coordinates { lat, lon } => format!("lat={lat} lon={lon}"),
        ClassifiedInput::FreeText { query } => format!("query={query}"),
    };
    format!("{}: {detail}", input.label())
}

pub fn location(result: &GeocodingResult) -> String {
    let mut place = result.name.clone();
    if let Some(state) = &result.state {
        place.push_str(", ");
        place.push_str(state);
    }
    if !result.country.is_empty() {
        place.push_str(", ");
        place.push_str(&result.country);
    }
    format!("{place} ({:.4}, {:.4})", result.lat, result.lon)
}

pub fn current(current: &CurrentWeather, units: Units, offset_secs: i64) -> String {
    let t = units.temperature_symbol();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Now ({}): {:.1}{t}, feels like {:.1}{t}, {}",
        local(current.observed_at(), offset_secs, "%Y-%m-%d %H:%M"),
        current.temp,
        current.feels_like,
        conditions(&current.weather)
    );
    let _ = writeln!(
        out,
        "Humidity {:.0}%  Wind {:.1} {}  Pressure {:.0} hPa  UV {:.1}",
        current.humidity,
        current.wind_speed,
        units.speed_symbol(),
        current.pressure,
        current.uvi
    );
    let _ = write!(
        out,
        "Sunrise {}  Sunset {}",
        local(current.sunrise_at(), offset_secs, "%H:%M"),
        local(current.sunset_at(), offset_secs, "%H:%M")
    );
    out
}

pub fn daily(days: &[Daily], units: Units, offset_secs: i64) -> String {
    if days.is_empty() {
        return "No daily forecast available".to_string();
    }
    let t = units.temperature_symbol();
    days.iter()
        .map(|d| {
            format!(
                "{}  {:>6.1}{t} / {:>6.1}{t}  rain {:>3.0}%  {}",
                local(d.forecast_at(), offset_secs, "%a %Y-%m-%d"),
                d.temp.max,
                d.temp.min,
                d.pop * 100.0,
                conditions(&d.weather)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn hourly(hours: &[Hourly], units: Units, offset_secs: i64) -> String {
    if hours.is_empty() {
        return "No hourly forecast available".to_string();
    }
    let t = units.temperature_symbol();
    hours
        .iter()
        .map(|h| {
            format!(
                "{}  {:>6.1}{t}  rain {:>3.0}%  {}",
                local(h.forecast_at(), offset_secs, "%a %H:%M"),
                h.temp,
                h.pop * 100.0,
                conditions(&h.weather)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn complete(data: &OneCallResponse, units: Units, days: usize, hours: usize) -> String {
    let offset = data.timezone_offset;
    let mut sections = vec![format!("Timezone: {}", data.timezone)];

    if let Some(now) = &data.current {
        sections.push(current(now, units, offset));
    }
    if data.hourly.is_some() {
        sections.push(hourly(leading(&data.hourly, hours), units, offset));
    }
    if data.daily.is_some() {
        sections.push(daily(leading(&data.daily, days), units, offset));
    }
    for alert in data.alerts.iter().flatten() {
        sections.push(format!(
            "ALERT {} ({}): {} - {}",
            alert.event,
            alert.sender_name,
            local(alert.starts_at(), offset, "%Y-%m-%d %H:%M"),
            local(alert.ends_at(), offset, "%Y-%m-%d %H:%M"),
        ));
    }

    sections.join("\n\n")
}
