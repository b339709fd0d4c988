//! Daily forecast aggregation
//!
//! Groups 3-hourly samples by UTC calendar day and reduces every group to a
//! single [`DailyForecast`]. Days are emitted in the order their first sample
//! appears; only the first `max_days` days are kept.

use chrono::{DateTime, NaiveDate};
use tracing::debug;

use crate::error::WeatherError;
use crate::models::{DailyForecast, WeatherSample};
use crate::units::{mps_to_kmh, round_to_int, title_case};

/// Samples collected for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    date: NaiveDate,
    temperatures: Vec<f64>,
    conditions: Vec<String>,
    descriptions: Vec<String>,
    humidity: Vec<u8>,
    wind_speeds: Vec<f64>,
}

impl DayBucket {
    /// Create an empty bucket for the given date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            temperatures: Vec::new(),
            conditions: Vec::new(),
            descriptions: Vec::new(),
            humidity: Vec::new(),
            wind_speeds: Vec::new(),
        }
    }

    /// Date key in `YYYY-MM-DD` form
    #[must_use]
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Number of samples in the bucket
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// Whether the bucket holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Append one sample; every sequence grows by exactly one value
    pub fn push(&mut self, sample: &WeatherSample) {
        self.temperatures.push(sample.temperature);
        self.conditions.push(sample.condition.clone());
        self.descriptions.push(sample.description.clone());
        self.humidity.push(sample.humidity);
        self.wind_speeds.push(sample.wind_speed);
    }

    /// Reduce the bucket to a daily summary
    ///
    /// Returns `None` for an empty bucket.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn summarize(&self) -> Option<DailyForecast> {
        let count = self.len() as f64;

        let max = self.temperatures.iter().copied().reduce(f64::max)?;
        let min = self.temperatures.iter().copied().reduce(f64::min)?;
        let condition = dominant(&self.conditions)?;
        let description = dominant(&self.descriptions)?;

        let humidity_sum: u32 = self.humidity.iter().map(|&h| u32::from(h)).sum();
        let humidity = (f64::from(humidity_sum) / count).round_ties_even() as u8;
        let wind_mean = self.wind_speeds.iter().sum::<f64>() / count;

        Some(DailyForecast {
            date: self.date,
            day_name: self.date.format("%a").to_string().to_uppercase(),
            date_label: self.date.format("%b %d").to_string(),
            temperature_max: round_to_int(max),
            temperature_min: round_to_int(min),
            condition: condition.to_string(),
            description: title_case(description),
            humidity,
            wind_speed: mps_to_kmh(wind_mean),
        })
    }
}

/// Most frequent value of a sequence
///
/// Ties go to the value that appears first in the sequence.
#[must_use]
pub fn dominant(values: &[String]) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((value, n));
        }
    }

    best.map(|(value, _)| value)
}

/// UTC calendar date of an epoch timestamp
///
/// # Errors
///
/// Returns a parse error if the timestamp is out of range.
pub fn utc_date(timestamp: i64) -> Result<NaiveDate, WeatherError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| WeatherError::ParseError(format!("Timestamp out of range: {timestamp}")))
}

/// Group samples into per-day buckets, in first-seen order
///
/// # Errors
///
/// Returns a parse error if any sample carries an out-of-range timestamp.
pub fn group_by_day(samples: &[WeatherSample]) -> Result<Vec<DayBucket>, WeatherError> {
    let mut buckets: Vec<DayBucket> = Vec::new();

    for sample in samples {
        let date = utc_date(sample.timestamp)?;
        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => bucket.push(sample),
            None => {
                let mut bucket = DayBucket::new(date);
                bucket.push(sample);
                buckets.push(bucket);
            },
        }
    }

    Ok(buckets)
}

/// Aggregate samples into at most `max_days` daily forecasts
///
/// # Errors
///
/// Returns a parse error if any sample carries an out-of-range timestamp.
pub fn aggregate_daily(
    samples: &[WeatherSample],
    max_days: usize,
) -> Result<Vec<DailyForecast>, WeatherError> {
    let buckets = group_by_day(samples)?;

    for dropped in buckets.iter().skip(max_days) {
        debug!(
            day = %dropped.key(),
            samples = dropped.len(),
            "Dropping forecast day past the limit"
        );
    }

    Ok(buckets
        .iter()
        .take(max_days)
        .filter_map(DayBucket::summarize)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-01-15T00:00:00Z
    const DAY_START: i64 = 1_705_276_800;
    const THREE_HOURS: i64 = 3 * 3600;

    fn sample(timestamp: i64, temperature: f64, condition: &str) -> WeatherSample {
        WeatherSample {
            timestamp,
            temperature,
            condition: condition.to_string(),
            description: condition.to_lowercase(),
            humidity: 50,
            wind_speed: 5.0,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_dominant_majority() {
        let values = strings(&["Rain", "Rain", "Clouds"]);
        assert_eq!(dominant(&values), Some("Rain"));
    }

    #[test]
    fn test_dominant_tie_prefers_first_seen() {
        let values = strings(&["Clouds", "Rain", "Rain", "Clouds", "Clear"]);
        assert_eq!(dominant(&values), Some("Clouds"));

        let values = strings(&["Clear", "Snow"]);
        assert_eq!(dominant(&values), Some("Clear"));
    }

    #[test]
    fn test_dominant_empty() {
        assert_eq!(dominant(&[]), None);
    }

    #[test]
    fn test_utc_date() {
        let date = utc_date(DAY_START + 23 * 3600).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        let date = utc_date(DAY_START + 24 * 3600).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());

        assert!(utc_date(i64::MAX).is_err());
    }

    #[test]
    fn test_bucket_sequences_stay_aligned() {
        let mut bucket = DayBucket::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(bucket.is_empty());

        for i in 0..4 {
            bucket.push(&sample(DAY_START + i * THREE_HOURS, 1.0, "Rain"));
        }

        assert_eq!(bucket.len(), 4);
        assert_eq!(bucket.conditions.len(), 4);
        assert_eq!(bucket.descriptions.len(), 4);
        assert_eq!(bucket.humidity.len(), 4);
        assert_eq!(bucket.wind_speeds.len(), 4);
        assert_eq!(bucket.key(), "2024-01-15");
    }

    #[test]
    fn test_summarize_reductions() {
        let mut bucket = DayBucket::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let readings = [
            (2.4, 40, 2.0, "Rain"),
            (7.6, 60, 4.0, "Rain"),
            (5.0, 50, 6.0, "Clouds"),
        ];
        for (i, (temp, humidity, wind, condition)) in readings.into_iter().enumerate() {
            let mut s = sample(DAY_START + i as i64 * THREE_HOURS, temp, condition);
            s.humidity = humidity;
            s.wind_speed = wind;
            bucket.push(&s);
        }

        let day = bucket.summarize().unwrap();
        assert_eq!(day.temperature_max, 8);
        assert_eq!(day.temperature_min, 2);
        assert_eq!(day.condition, "Rain");
        assert_eq!(day.description, "Rain");
        assert_eq!(day.humidity, 50);
        assert!((day.wind_speed - 14.4).abs() < f64::EPSILON);
        assert_eq!(day.day_name, "MON");
        assert_eq!(day.date_label, "Jan 15");
    }

    #[test]
    fn test_summarize_votes_description_independently() {
        let mut bucket = DayBucket::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let entries = [
            ("Rain", "light rain"),
            ("Rain", "moderate rain"),
            ("Clouds", "broken clouds"),
            ("Clouds", "broken clouds"),
            ("Rain", "heavy intensity rain"),
        ];
        for (i, (condition, description)) in entries.into_iter().enumerate() {
            let mut s = sample(DAY_START + i as i64 * THREE_HOURS, 3.0, condition);
            s.description = description.to_string();
            bucket.push(&s);
        }

        let day = bucket.summarize().unwrap();
        assert_eq!(day.condition, "Rain");
        assert_eq!(day.description, "Broken Clouds");
    }

    #[test]
    fn test_summarize_empty_bucket() {
        let bucket = DayBucket::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(bucket.summarize().is_none());
    }

    #[test]
    fn test_aggregate_five_days() {
        let samples: Vec<WeatherSample> = (0..40)
            .map(|i| sample(DAY_START + i * THREE_HOURS, f64::from(i as i32), "Clear"))
            .collect();

        let days = aggregate_daily(&samples, 5).unwrap();
        assert_eq!(days.len(), 5);

        for (i, day) in days.iter().enumerate() {
            let expected = NaiveDate::from_ymd_opt(2024, 1, 15 + i as u32).unwrap();
            assert_eq!(day.date, expected);
            // Eight samples per day: temperatures 8i..=8i+7
            assert_eq!(day.temperature_min, 8 * i as i32);
            assert_eq!(day.temperature_max, 8 * i as i32 + 7);
        }
    }

    #[test]
    fn test_aggregate_truncates_to_earliest_days() {
        // Starts at 21:00 on Jan 15 so 40 samples touch six dates
        let start = DAY_START + 7 * THREE_HOURS;
        let samples: Vec<WeatherSample> = (0..40)
            .map(|i| sample(start + i * THREE_HOURS, 10.0, "Clouds"))
            .collect();

        assert_eq!(group_by_day(&samples).unwrap().len(), 6);

        let days = aggregate_daily(&samples, 5).unwrap();
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 1, 19).unwrap());
    }

    #[test]
    fn test_aggregate_preserves_first_seen_order() {
        let samples = vec![
            sample(DAY_START + 24 * 3600, 1.0, "Rain"),
            sample(DAY_START, 2.0, "Clear"),
            sample(DAY_START + 24 * 3600 + THREE_HOURS, 3.0, "Rain"),
        ];

        let days = aggregate_daily(&samples, 5).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(days[0].temperature_max, 3);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_aggregate_empty() {
        let days = aggregate_daily(&[], 5).unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn test_aggregate_rejects_bad_timestamp() {
        let samples = vec![sample(i64::MIN, 1.0, "Rain")];
        assert!(matches!(
            aggregate_daily(&samples, 5),
            Err(WeatherError::ParseError(_))
        ));
    }
}
