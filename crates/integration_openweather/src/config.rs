//! OpenWeatherMap client configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Maximum number of daily records the forecast endpoint can fill
pub const MAX_FORECAST_DAYS: usize = 5;

/// Weather service configuration
///
/// Requests always ask for metric units; unknown keys are rejected.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of daily forecast records to produce (1-5, default: 5)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_forecast_days() -> usize {
    MAX_FORECAST_DAYS
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_days", &self.forecast_days)
            .finish()
    }
}

impl WeatherConfig {
    /// Create a configuration with the given API key and default settings
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !(1..=MAX_FORECAST_DAYS).contains(&self.forecast_days) {
            return Err(format!(
                "forecast_days must be between 1 and {MAX_FORECAST_DAYS}"
            ));
        }

        Ok(())
    }
}
