//! Dashboard flow: current conditions first, forecast only if they exist

use integration_openweather::{
    CurrentConditions, DailyForecast, WeatherClient, fetch_current, fetch_forecast,
};
use serde::Serialize;

/// Cities offered for a quick pick
pub const POPULAR_CITIES: &[&str] = &[
    "Chennai", "Tokyo", "London", "New York", "Berlin", "Sydney", "Dubai", "Mumbai",
];

/// Everything shown for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Current conditions
    pub current: CurrentConditions,
    /// Daily forecast, absent when it failed or came back empty
    pub forecast: Option<Vec<DailyForecast>>,
}

/// Trim user input, rejecting blank city names
pub fn normalize_city(input: &str) -> Option<&str> {
    let city = input.trim();
    (!city.is_empty()).then_some(city)
}

/// Load the dashboard for a city
///
/// Returns `None` when current conditions are unavailable; the forecast is
/// not requested in that case.
pub async fn load_dashboard(client: &dyn WeatherClient, city: &str) -> Option<Dashboard> {
    let current = fetch_current(client, city).await?;
    let forecast = fetch_forecast(client, city)
        .await
        .filter(|days| !days.is_empty());

    Some(Dashboard { current, forecast })
}
