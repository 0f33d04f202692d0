//! Calendar-key conversion and display formatting.
//!
//! Axis timestamps are UTC-midnight unix seconds derived deterministically
//! from a record's 8-digit date key, so every derived series shares one time
//! axis. Formatting never faults: non-finite numeric input is coerced to zero
//! to keep the display renderable.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::core::types::Granularity;
use crate::error::{ChartViewError, ChartViewResult};

/// Converts a `YYYYMMDD` date key to UTC-midnight unix seconds.
pub fn date_key_to_unix_seconds(date_key: &str) -> ChartViewResult<i64> {
    let invalid = || ChartViewError::InvalidDateKey {
        key: date_key.to_owned(),
    };

    if date_key.len() != 8 || !date_key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year: i32 = date_key[..4].parse().map_err(|_| invalid())?;
    let month: u32 = date_key[4..6].parse().map_err(|_| invalid())?;
    let day: u32 = date_key[6..8].parse().map_err(|_| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    Ok(midnight.and_utc().timestamp())
}

/// Calendar components of an axis timestamp, for label rendering.
#[must_use]
pub fn unix_seconds_to_ymd(timestamp: i64) -> (i32, u32, u32) {
    let datetime = DateTime::from_timestamp(timestamp, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    (datetime.year(), datetime.month(), datetime.day())
}

/// Formats an axis timestamp as `YYYY.MM.DD` for the tooltip header.
#[must_use]
pub fn format_tooltip_date(timestamp: i64) -> String {
    let (year, month, day) = unix_seconds_to_ymd(timestamp);
    format!("{year:04}.{month:02}.{day:02}")
}

/// Formats a time-axis tick label for the given display granularity.
///
/// Yearly and monthly modes label ticks with the year only; daily and weekly
/// modes label them with the month.
#[must_use]
pub fn format_tick_label(timestamp: i64, granularity: Granularity) -> String {
    let (year, month, _) = unix_seconds_to_ymd(timestamp);
    if granularity.tick_labels_show_year() {
        format!("{year}")
    } else {
        format!("{month}월")
    }
}

/// Coerces non-finite values to zero so formatting never faults.
#[must_use]
pub fn coerce_finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Formats a price rounded to an integer with thousands grouping.
#[must_use]
pub fn format_price(value: f64) -> String {
    group_thousands(coerce_finite(value).round() as i64)
}

/// Formats a traded-volume figure with thousands grouping.
#[must_use]
pub fn format_volume(value: f64) -> String {
    group_thousands(coerce_finite(value).round() as i64)
}

/// Formats a change-versus-previous-close row: `+50 (5.00%)`.
///
/// The percentage renders as `-` when unavailable (previous close not > 0).
#[must_use]
pub fn format_change(diff: f64, percent: Option<f64>) -> String {
    let sign = if diff >= 0.0 { "+" } else { "" };
    let percent_label = match percent {
        Some(p) => format!("{:.2}", coerce_finite(p)),
        None => "-".to_owned(),
    };
    format!("{sign}{} ({percent_label}%)", format_price(diff))
}

/// Clamps `value` into `[min, max]`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % 3 == lead % 3 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
