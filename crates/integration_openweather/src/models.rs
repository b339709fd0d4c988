//! Weather data models
//!
//! Display-ready records produced from OpenWeatherMap responses, plus the raw
//! payload shapes they are derived from.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;
use crate::units::{meters_to_km, mps_to_kmh, round_to_int, title_case};

/// Current weather conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// City name as reported by the API
    pub city: String,
    /// ISO 3166 country code
    pub country: String,
    /// Temperature in Celsius
    pub temperature: i32,
    /// Apparent (feels like) temperature in Celsius
    pub feels_like: i32,
    /// Minimum observed temperature in Celsius
    pub temperature_min: i32,
    /// Maximum observed temperature in Celsius
    pub temperature_max: i32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Sea-level pressure in hPa
    pub pressure: u32,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees (0 when not reported)
    pub wind_direction: u16,
    /// Visibility in km (0 when not reported)
    pub visibility_km: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: u8,
    /// Condition category, e.g. "Rain"
    pub condition: String,
    /// Human description, title-cased
    pub description: String,
    /// Icon identifier, e.g. "10d"
    pub icon: String,
    /// Sunrise (epoch seconds, UTC)
    pub sunrise: i64,
    /// Sunset (epoch seconds, UTC)
    pub sunset: i64,
    /// Offset of the location from UTC in seconds
    pub utc_offset_secs: i32,
    /// Observation time (epoch seconds, UTC)
    pub observed: i64,
}

impl CurrentConditions {
    /// Express an epoch timestamp in the location's local time
    #[must_use]
    pub fn local_time(&self, timestamp: i64) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.utc_offset_secs)?;
        DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&offset))
    }
}

impl TryFrom<api::CurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(data: api::CurrentResponse) -> Result<Self, Self::Error> {
        let weather = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::ParseError("Empty weather array".to_string()))?;

        Ok(Self {
            city: data.name,
            country: data.sys.country,
            temperature: round_to_int(data.main.temp),
            feels_like: round_to_int(data.main.feels_like),
            temperature_min: round_to_int(data.main.temp_min),
            temperature_max: round_to_int(data.main.temp_max),
            humidity: data.main.humidity,
            pressure: data.main.pressure,
            wind_speed: mps_to_kmh(data.wind.speed),
            wind_direction: data.wind.deg.unwrap_or(0),
            visibility_km: meters_to_km(f64::from(data.visibility.unwrap_or(0))),
            cloud_cover: data.clouds.all,
            condition: weather.main,
            description: title_case(&weather.description),
            icon: weather.icon,
            sunrise: data.sys.sunrise,
            sunset: data.sys.sunset,
            utc_offset_secs: data.timezone,
            observed: data.dt,
        })
    }
}

/// One 3-hourly forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Sample time (epoch seconds, UTC)
    pub timestamp: i64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Condition category, e.g. "Rain"
    pub condition: String,
    /// Free-text description
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
}

impl TryFrom<api::ForecastItem> for WeatherSample {
    type Error = WeatherError;

    fn try_from(item: api::ForecastItem) -> Result<Self, Self::Error> {
        let weather = item.weather.into_iter().next().ok_or_else(|| {
            WeatherError::ParseError(format!("Empty weather array in sample at {}", item.dt))
        })?;

        Ok(Self {
            timestamp: item.dt,
            temperature: item.main.temp,
            condition: weather.main,
            description: weather.description,
            humidity: item.main.humidity,
            wind_speed: item.wind.speed,
        })
    }
}

/// Daily forecast summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Forecast date (UTC calendar day)
    pub date: NaiveDate,
    /// Upper-cased weekday abbreviation, e.g. "MON"
    pub day_name: String,
    /// Short date label, e.g. "Jan 15"
    pub date_label: String,
    /// Maximum temperature in Celsius
    pub temperature_max: i32,
    /// Minimum temperature in Celsius
    pub temperature_min: i32,
    /// Most frequent condition category of the day
    pub condition: String,
    /// Most frequent description of the day, title-cased
    pub description: String,
    /// Mean relative humidity percentage
    pub humidity: u8,
    /// Mean wind speed in km/h
    pub wind_speed: f64,
}

/// Raw OpenWeatherMap payloads
pub(crate) mod api {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Weather {
        pub main: String,
        pub description: String,
        #[serde(default)]
        pub icon: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CurrentMain {
        pub temp: f64,
        pub feels_like: f64,
        pub temp_min: f64,
        pub temp_max: f64,
        pub humidity: u8,
        pub pressure: u32,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Wind {
        pub speed: f64,
        #[serde(default)]
        pub deg: Option<u16>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Clouds {
        pub all: u8,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Sys {
        pub country: String,
        pub sunrise: i64,
        pub sunset: i64,
    }

    /// Response of the `/weather` endpoint
    #[derive(Debug, Clone, Deserialize)]
    pub struct CurrentResponse {
        pub name: String,
        pub sys: Sys,
        pub main: CurrentMain,
        pub wind: Wind,
        #[serde(default)]
        pub visibility: Option<u32>,
        pub clouds: Clouds,
        pub weather: Vec<Weather>,
        pub timezone: i32,
        pub dt: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SampleMain {
        pub temp: f64,
        pub humidity: u8,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: SampleMain,
        pub weather: Vec<Weather>,
        pub wind: Wind,
    }

    /// Response of the `/forecast` endpoint
    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
    }
}
