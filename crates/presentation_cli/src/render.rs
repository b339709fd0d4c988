//! Plain-text output of weather records

use std::fmt::Write;

use integration_openweather::units::celsius_to_fahrenheit;
use integration_openweather::{CurrentConditions, DailyForecast};

/// Output options chosen on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Show Fahrenheit next to Celsius
    pub fahrenheit: bool,
}

/// Format a Celsius value, optionally with its Fahrenheit equivalent
fn temperature(celsius: i32, options: RenderOptions) -> String {
    if options.fahrenheit {
        format!(
            "{celsius}°C / {:.1}°F",
            celsius_to_fahrenheit(f64::from(celsius))
        )
    } else {
        format!("{celsius}°C")
    }
}

/// Local clock time of an epoch timestamp, e.g. "06:42 AM"
pub fn local_clock(current: &CurrentConditions, timestamp: i64) -> String {
    current
        .local_time(timestamp)
        .map_or_else(|| "--:--".to_string(), |t| t.format("%I:%M %p").to_string())
}

/// Render current conditions
pub fn render_current(current: &CurrentConditions, options: RenderOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", current.city, current.country);
    let _ = writeln!(
        out,
        "{}  {} ({})",
        temperature(current.temperature, options),
        current.description,
        current.condition
    );
    let _ = writeln!(
        out,
        "Feels like {}  Low {}  High {}",
        temperature(current.feels_like, options),
        temperature(current.temperature_min, options),
        temperature(current.temperature_max, options)
    );
    let _ = writeln!(out, "Humidity    {}%", current.humidity);
    let _ = writeln!(out, "Pressure    {} hPa", current.pressure);
    let _ = writeln!(
        out,
        "Wind        {:.1} km/h at {}°",
        current.wind_speed, current.wind_direction
    );
    let _ = writeln!(out, "Visibility  {:.1} km", current.visibility_km);
    let _ = writeln!(out, "Clouds      {}%", current.cloud_cover);
    let _ = writeln!(
        out,
        "Sunrise     {}",
        local_clock(current, current.sunrise)
    );
    let _ = write!(out, "Sunset      {}", local_clock(current, current.sunset));

    out
}

/// Render a daily forecast, one line per day
pub fn render_forecast(days: &[DailyForecast], options: RenderOptions) -> String {
    let mut out = String::new();

    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{} {}  {} / {}  {}  humidity {}%  wind {:.1} km/h",
            day.day_name,
            day.date_label,
            temperature(day.temperature_max, options),
            temperature(day.temperature_min, options),
            day.description,
            day.humidity,
            day.wind_speed
        );
    }

    out
}
