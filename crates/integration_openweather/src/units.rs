//! Unit conversion and rounding helpers
//!
//! Integer rounding resolves halves to the even neighbour, so `22.5` becomes
//! `22` and `23.5` becomes `24`. One-decimal rounding works on the exact
//! binary value, so `0.35` (stored slightly below) becomes `0.3` while
//! `0.45` (stored slightly above) becomes `0.5`.

/// Conversion factor from metres per second to kilometres per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Round to the nearest integer
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_int(value: f64) -> i32 {
    value.round_ties_even() as i32
}

/// Round to one decimal place
///
/// Rounds the exact stored value through its decimal form; exact halves go
/// to the even digit.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Convert m/s to km/h, rounded to one decimal
#[must_use]
pub fn mps_to_kmh(speed: f64) -> f64 {
    round_to_tenth(speed * MPS_TO_KMH)
}

/// Convert metres to kilometres, rounded to one decimal
#[must_use]
pub fn meters_to_km(meters: f64) -> f64 {
    round_to_tenth(meters / 1000.0)
}

/// Convert °C to °F, rounded to one decimal
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_to_tenth(celsius * 9.0 / 5.0 + 32.0)
}

/// Convert °F to °C, rounded to one decimal
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round_to_tenth((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// Title-case a string
///
/// A letter is upper-cased when it does not directly follow another letter
/// and lower-cased otherwise, so `"light rain"` becomes `"Light Rain"` and
/// `"o'hare"` becomes `"O'Hare"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
