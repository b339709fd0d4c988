//! OpenWeatherMap error types

use thiserror::Error;

/// Errors that can occur while fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API does not know the requested city (HTTP 404)
    #[error("City not found: {city}")]
    NotFound {
        /// The city name that was queried
        city: String,
    },

    /// API key is missing or invalid (HTTP 401)
    #[error("Invalid API key")]
    Unauthorized,

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete before the configured deadline
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Response body was malformed or lacked expected fields
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Any other failure, including unexpected HTTP statuses
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Coarse failure category of a [`WeatherError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP 404
    NotFound,
    /// HTTP 401
    Unauthorized,
    /// Connection failure
    Network,
    /// Deadline exceeded
    Timeout,
    /// Malformed response
    Parse,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    /// Short label used in log records
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Parse => "parse",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherError {
    /// Returns the failure category of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::ConnectionFailed(_) => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::ParseError(_) => ErrorKind::Parse,
            Self::RequestFailed(_) => ErrorKind::Unknown,
        }
    }

    /// Map a transport error from reqwest onto the taxonomy
    pub(crate) fn from_transport(e: &reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if e.is_connect() {
            Self::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            Self::ParseError(e.to_string())
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}
