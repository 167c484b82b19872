use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use geoweather_core::{
    Config, GeocodingClient, Geocoder, OneCallClient, Section, ServiceConfig, Units,
    WeatherProvider, classify,
    provider::{DEFAULT_FORECAST_DAYS, DEFAULT_FORECAST_HOURS},
};
use inquire::{Password, PasswordDisplayMode, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geoweather", version, about = "Location lookup and weather CLI")]
pub struct Cli {
    /// Log outbound requests.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Which part of the weather data `show` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    All,
    Current,
    Daily,
    Hourly,
}

impl View {
    /// Sections left out of the One Call request for this view.
    fn exclude(self) -> Vec<Section> {
        match self {
            View::All => Vec::new(),
            View::Current => Section::all_except(Section::Current),
            View::Daily => Section::all_except(Section::Daily),
            View::Hourly => Section::all_except(Section::Hourly),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and default units.
    Configure,

    /// Show how a location would be interpreted, without calling the API.
    Classify {
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// Resolve a location to coordinates.
    Locate {
        /// Postal code, "city, state, US", "city, country", "lat,lon" or free text.
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// Show weather for a location.
    Show {
        /// Postal code, "city, state, US", "city, country", "lat,lon" or free text.
        #[arg(allow_hyphen_values = true)]
        location: String,

        #[arg(long, value_enum, default_value_t = View::Current)]
        view: View,

        /// Number of days for the daily view.
        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: usize,

        /// Number of hours for the hourly view.
        #[arg(long, default_value_t = DEFAULT_FORECAST_HOURS)]
        hours: usize,

        /// standard, metric or imperial; overrides the configured units.
        #[arg(long)]
        units: Option<Units>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Classify { input } => {
                let classified = classify(&input)?;
                println!("{}", render::classification(&classified));
                Ok(())
            }
            Command::Locate { input } => {
                let geocoder = GeocodingClient::new(service_config()?);
                let location = geocoder.locate(&input).await?;
                println!("{}", render::location(&location));
                Ok(())
            }
            Command::Show { location, view, days, hours, units } => {
                let mut config = service_config()?;
                if let Some(units) = units {
                    config = config.with_units(units);
                }
                show(config, &location, view, days, hours).await
            }
        }
    }
}

fn service_config() -> Result<ServiceConfig> {
    let config = Config::load()?.with_env_overrides()?;
    Ok(config.service_config()?)
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let current_units = config.units.unwrap_or_default();
    let start = Units::all().iter().position(|u| *u == current_units).unwrap_or(0);
    let units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    let language = Text::new("Language code:")
        .with_default(config.language.as_deref().unwrap_or("en"))
        .prompt()
        .context("Failed to read language")?;

    config.api_key = Some(api_key.trim().to_string());
    config.units = Some(units);
    config.language = Some(language.trim().to_string());

    // Fail here rather than on the first lookup.
    config.service_config()?;
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(config: ServiceConfig, input: &str, view: View, days: usize, hours: usize) -> Result<()> {
    let units = config.units();
    let geocoder = GeocodingClient::new(config.clone());
    let weather = OneCallClient::new(config);

    let location = geocoder.locate(input).await?;
    println!("{}", render::location(&location));

    // One request per view; the response carries the location's UTC offset.
    let data = weather.fetch_snapshot(location.lat, location.lon, &view.exclude()).await?;
    let offset = data.timezone_offset;

    let output = match view {
        View::Current => {
            let current =
                data.current.as_ref().context("Weather response has no current conditions")?;
            render::current(current, units, offset)
        }
        View::Daily => render::daily(render::leading(&data.daily, days), units, offset),
        View::Hourly => render::hourly(render::leading(&data.hourly, hours), units, offset),
        View::All => render::complete(&data, units, days, hours),
    };
    println!("{output}");

    Ok(())
}
