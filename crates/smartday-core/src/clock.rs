//! Wall-clock helpers shared by validation and the scheduler.
//!
//! Clock strings are `HH:MM` (one or two digits per part). Durations come in
//! as fractional hours and are converted at microsecond resolution.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::error::ValidationError;

/// Default window start when a request omits `start_time`.
pub const DEFAULT_START: &str = "09:00";

/// Parse `HH:MM` into a clock time.
///
/// Returns `None` unless there are exactly two numeric parts with
/// hour < 24 and minute < 60.
pub fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    let (hour, minute) = text.split_once(':')?;
    if minute.contains(':') {
        return None;
    }
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse an optional clock field, falling back to `default` when absent or empty.
pub fn parse_clock_field(
    field: &str,
    value: Option<&str>,
    default: NaiveTime,
) -> Result<NaiveTime, ValidationError> {
    match value {
        None => Ok(default),
        Some(text) if text.is_empty() => Ok(default),
        Some(text) => parse_hhmm(text).ok_or_else(|| ValidationError::InvalidClock {
            field: field.to_string(),
            value: text.to_string(),
        }),
    }
}

/// `HH:MM` rendering; seconds are truncated.
pub fn format_clock(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Fractional hours as a duration, rounded to the microsecond.
///
/// Values too large to represent saturate, so callers combine the result
/// with checked date arithmetic.
pub fn hours(value: f64) -> Duration {
    let micros = (value * 3_600_000_000.0).round();
    if micros >= i64::MAX as f64 {
        Duration::microseconds(i64::MAX)
    } else {
        Duration::microseconds(micros as i64)
    }
}

/// Render hours the shortest round-trip way, always with a decimal point
/// (`2.0`, `1.5`, `0.25`).
///
/// Below 1e-4 and from 1e16 up the value switches to exponent form with a
/// signed, two-digit-minimum exponent (`1e-05`, `2.5e+16`).
pub fn format_hours(value: f64) -> String {
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
