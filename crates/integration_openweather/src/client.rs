//! OpenWeatherMap client
//!
//! HTTP client for the current weather (`/weather`) and 5 day / 3 hour
//! forecast (`/forecast`) endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::aggregation::aggregate_daily;
use crate::config::WeatherConfig;
use crate::error::{ErrorKind, WeatherError};
use crate::models::api::{CurrentResponse, ForecastResponse};
use crate::models::{CurrentConditions, DailyForecast, WeatherSample};

/// Unit system requested from the API; every derived field assumes it
const UNITS: &str = "metric";

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a city
    async fn get_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Get the daily forecast for a city, at most five days
    async fn get_forecast(&self, city: &str) -> Result<Vec<DailyForecast>, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new OpenWeatherMap client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.is_none() {
            warn!("No OpenWeatherMap API key configured, requests will be rejected");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration and the given API key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::with_api_key(api_key))
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Build the endpoint URL, without query parameters
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue one GET for a city and decode the JSON body
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = self.endpoint_url(endpoint);
        debug!(url = %url, "Sending OpenWeatherMap request");

        let api_key = self
            .config
            .api_key
            .as_ref()
            .map_or("", |key| key.expose_secret());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", UNITS),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::from_transport(&e, self.config.timeout_secs))?;

        let response = Self::check_status(response, city)?;

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::from_transport(&e, self.config.timeout_secs))?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Map non-success statuses onto the error taxonomy
    fn check_status(response: Response, city: &str) -> Result<Response, WeatherError> {
        let status = response.status();
        debug!(status = %status, "Received OpenWeatherMap response");

        match status {
            StatusCode::NOT_FOUND => Err(WeatherError::NotFound {
                city: city.to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            s if !s.is_success() => Err(WeatherError::RequestFailed(format!("HTTP {s}"))),
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn get_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let raw: CurrentResponse = self.request("weather", city).await?;
        let current = CurrentConditions::try_from(raw)?;

        info!(city = %current.city, country = %current.country, "Fetched current conditions");
        Ok(current)
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, city: &str) -> Result<Vec<DailyForecast>, WeatherError> {
        let raw: ForecastResponse = self.request("forecast", city).await?;

        let samples = raw
            .list
            .into_iter()
            .map(WeatherSample::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let daily = aggregate_daily(&samples, self.config.forecast_days)?;

        debug!(
            samples = samples.len(),
            days = daily.len(),
            "Aggregated forecast"
        );
        Ok(daily)
    }
}

/// Fetch current conditions, collapsing every failure to `None`
///
/// The failure category is only visible in the log stream: a missing city is
/// logged as a warning, everything else as an error.
pub async fn fetch_current(client: &dyn WeatherClient, city: &str) -> Option<CurrentConditions> {
    match client.get_current(city).await {
        Ok(current) => Some(current),
        Err(e) => {
            match e.kind() {
                ErrorKind::NotFound => warn!(city = %city, "City not found"),
                ErrorKind::Unauthorized => error!("Invalid API key"),
                ErrorKind::Network => error!(error = %e, "Connection error"),
                ErrorKind::Timeout => error!(error = %e, "Request timed out"),
                kind @ (ErrorKind::Parse | ErrorKind::Unknown) => {
                    error!(kind = %kind, error = %e, "Current conditions request failed");
                },
            }
            None
        },
    }
}

/// Fetch the daily forecast, collapsing every failure to `None`
pub async fn fetch_forecast(
    client: &dyn WeatherClient,
    city: &str,
) -> Option<Vec<DailyForecast>> {
    match client.get_forecast(city).await {
        Ok(daily) => Some(daily),
        Err(e) => {
            error!(kind = %e.kind(), error = %e, "Forecast error");
            None
        },
    }
}
