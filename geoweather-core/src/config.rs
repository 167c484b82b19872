use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, str::FromStr};
use thiserror::Error;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/";
pub const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
pub const DEFAULT_LANGUAGE: &str = "en";

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_GEOCODING_URL: &str = "OPENWEATHER_GEOCODING_URL";
pub const ENV_ONECALL_URL: &str = "OPENWEATHER_ONECALL_URL";
pub const ENV_UNITS: &str = "OPENWEATHER_UNITS";
pub const ENV_LANGUAGE: &str = "OPENWEATHER_LANG";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "API key is required.\n\
         Hint: run `geoweather configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,

    #[error("Unknown unit system '{0}'. Supported units: standard, metric, imperial.")]
    UnknownUnits(String),
}

/// Unit system requested from the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, m/s
    Standard,
    /// Celsius, m/s
    #[default]
    Metric,
    /// Fahrenheit, mph
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Standard, Units::Metric, Units::Imperial]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Standard | Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(ConfigError::UnknownUnits(value.to_string())),
        }
    }
}

/// Validated settings shared by the geocoding and weather clients.
///
/// Built once and never mutated; `with_*` methods return a modified copy.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    api_key: String,
    geocoding_url: String,
    onecall_url: String,
    units: Units,
    language: String,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"[REDACTED]")
            .field("geocoding_url", &self.geocoding_url)
            .field("onecall_url", &self.onecall_url)
            .field("units", &self.units)
            .field("language", &self.language)
            .finish()
    }
}

impl ServiceConfig {
    /// Fails with [`ConfigError::MissingApiKey`] when `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            onecall_url: DEFAULT_ONECALL_URL.to_string(),
            units: Units::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Base URL of the geocoding API; endpoint names are appended, so it should end with `/`.
    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Self {
        self.geocoding_url = url.into();
        self
    }

    pub fn with_onecall_url(mut self, url: impl Into<String>) -> Self {
        self.onecall_url = url.into();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn geocoding_url(&self) -> &str {
        &self.geocoding_url
    }

    pub fn onecall_url(&self) -> &str {
        &self.onecall_url
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "imperial"
/// language = "en"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub units: Option<Units>,
    pub language: Option<String>,
    /// Override for the geocoding API base URL.
    pub geocoding_url: Option<String>,
    /// Override for the One Call endpoint.
    pub onecall_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geoweather", "geoweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `OPENWEATHER_*` environment variables on top of the file values.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = var(ENV_GEOCODING_URL) {
            self.geocoding_url = Some(url);
        }
        if let Some(url) = var(ENV_ONECALL_URL) {
            self.onecall_url = Some(url);
        }
        if let Some(units) = var(ENV_UNITS) {
            let units = units
                .parse()
                .with_context(|| format!("Invalid value in {ENV_UNITS}"))?;
            self.units = Some(units);
        }
        if let Some(lang) = var(ENV_LANGUAGE) {
            self.language = Some(lang);
        }

        Ok(self)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Build the validated client configuration.
    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let mut service = ServiceConfig::new(self.api_key.clone().unwrap_or_default())?;

        if let Some(url) = &self.geocoding_url {
            service = service.with_geocoding_url(url.clone());
        }
        if let Some(url) = &self.onecall_url {
            service = service.with_onecall_url(url.clone());
        }
        if let Some(units) = self.units {
            service = service.with_units(units);
        }
        if let Some(lang) = &self.language {
            service = service.with_language(lang.clone());
        }

        Ok(service)
    }
}
