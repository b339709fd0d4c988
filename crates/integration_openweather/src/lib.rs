//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Fetches current conditions and aggregates the 3-hourly forecast into
//! daily summaries.

pub mod aggregation;
pub mod client;
mod config;
mod error;
mod models;
pub mod units;

pub use aggregation::{DayBucket, aggregate_daily, dominant};
pub use client::{OpenWeatherClient, WeatherClient, fetch_current, fetch_forecast};
pub use config::{MAX_FORECAST_DAYS, WeatherConfig};
pub use error::{ErrorKind, WeatherError};
pub use models::{CurrentConditions, DailyForecast, WeatherSample};
