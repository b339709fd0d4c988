//! CLI configuration loading
//!
//! Sources, lowest precedence first:
//! - built-in defaults of [`WeatherConfig`]
//! - `storm.toml` in the working directory, or the file given with `--config`
//! - environment variables prefixed `STORM_` (e.g. `STORM_WEATHER__TIMEOUT_SECS`)
//!
//! When no API key is configured, `OPENWEATHER_API_KEY` is used.

use std::path::Path;

use integration_openweather::WeatherConfig;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the OpenWeatherMap API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Prefix of environment overrides
const ENV_PREFIX: &str = "STORM";

/// Default configuration file name, without extension
const DEFAULT_FILE: &str = "storm";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not acceptable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// OpenWeatherMap client settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, a source
    /// cannot be parsed, or the resulting values fail validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_key(path, std::env::var(API_KEY_ENV).ok())
    }

    fn load_with_key(
        path: Option<&Path>,
        fallback_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_FILE).required(false),
        };

        let mut app: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if app.weather.api_key.is_none() {
            app.weather.api_key = fallback_key
                .filter(|k| !k.trim().is_empty())
                .map(|key| {
                    debug!(env = API_KEY_ENV, "Using API key from environment");
                    SecretString::from(key)
                });
        }

        app.weather.validate().map_err(ConfigError::Invalid)?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn exposed(config: &AppConfig) -> Option<String> {
        config
            .weather
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().to_string())
    }

    #[test]
    fn loads_values_from_file() {
        let file = write_config(
            r#"
            [weather]
            api_key = "file-key"
            timeout_secs = 4
            forecast_days = 3
            "#,
        );

        let config = AppConfig::load_with_key(Some(file.path()), None).unwrap();
        assert_eq!(exposed(&config), Some("file-key".to_string()));
        assert_eq!(config.weather.timeout_secs, 4);
        assert_eq!(config.weather.forecast_days, 3);
    }

    #[test]
    fn file_without_weather_table_uses_defaults() {
        let file = write_config("# empty\n");

        let config = AppConfig::load_with_key(Some(file.path()), None).unwrap();
        assert!(config.weather.api_key.is_none());
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
    }

    #[test]
    fn falls_back_to_environment_key() {
        let file = write_config("[weather]\ntimeout_secs = 10\n");

        let config =
            AppConfig::load_with_key(Some(file.path()), Some("env-key".to_string())).unwrap();
        assert_eq!(exposed(&config), Some("env-key".to_string()));
    }

    #[test]
    fn file_key_wins_over_environment_key() {
        let file = write_config("[weather]\napi_key = \"file-key\"\n");

        let config =
            AppConfig::load_with_key(Some(file.path()), Some("env-key".to_string())).unwrap();
        assert_eq!(exposed(&config), Some("file-key".to_string()));
    }

    #[test]
    fn blank_environment_key_is_ignored() {
        let file = write_config("");

        let config =
            AppConfig::load_with_key(Some(file.path()), Some("  ".to_string())).unwrap();
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        let file = write_config("[weather]\nforecast_days = 9\n");

        let result = AppConfig::load_with_key(Some(file.path()), None);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unit_system_in_file_is_rejected() {
        let file = write_config("[weather]\nunits = \"imperial\"\n");

        let result = AppConfig::load_with_key(Some(file.path()), None);
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_with_key(Some(Path::new("/nonexistent/storm.toml")), None);
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
