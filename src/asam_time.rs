//! Helpers for the ASAM ODS date-string form `YYYYMMDDHHMMSSFFF`.
//!
//! The server represents datetime values as digit strings of varying
//! precision, at minimum `YYYYMMDD`. These helpers convert between
//! that form and [`chrono::NaiveDateTime`].

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AsamTimeError {
    #[error("Time value must at least contain year, month and day.")]
    TooShort,

    #[error("'{value}' is not a valid ASAM date string.")]
    Invalid { value: String },
}

/// Parse an ASAM date string into a timestamp.
///
/// Shorter strings are zero padded on the right before slicing, so
/// `"20240115"` is midnight on that day. Up to 23 digits (nanosecond
/// precision) are honored, anything beyond is ignored.
pub fn parse(asam_time: &str) -> Result<NaiveDateTime, AsamTimeError> {
    if asam_time.len() < 8 {
        return Err(AsamTimeError::TooShort);
    }

    let mut normalized = asam_time.to_string();
    let target = match asam_time.len() {
        0..=14 => 14,
        15..=20 => 20,
        _ => 23,
    };
    while normalized.len() < target {
        normalized.push('0');
    }

    let invalid = || AsamTimeError::Invalid {
        value: asam_time.to_string(),
    };
    let field = |range: std::ops::Range<usize>| -> Result<u32, AsamTimeError> {
        normalized
            .get(range)
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| invalid())
    };

    let year = field(0..4)? as i32;
    let month = field(4..6)?;
    let day = field(6..8)?;
    let hour = field(8..10)?;
    let minute = field(10..12)?;
    let second = field(12..14)?;
    let micros = if normalized.len() >= 20 { field(14..20)? } else { 0 };
    let nanos_part = if normalized.len() >= 23 { field(20..23)? } else { 0 };

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, micros * 1_000 + nanos_part))
        .ok_or_else(invalid)
}

/// Format a timestamp as an ASAM date string, truncated to `length`
/// digits. Lengths above 20 include the nanosecond digits; the
/// maximum meaningful length is 23.
pub fn format(timestamp: NaiveDateTime, length: usize) -> String {
    let nanos = timestamp.nanosecond();
    let mut rendered = format!(
        "{}{:06}",
        timestamp.format("%Y%m%d%H%M%S"),
        nanos / 1_000
    );
    if length > 20 {
        rendered.push_str(&format!("{:03}", nanos % 1_000));
    }
    rendered.truncate(length.min(rendered.len()));
    rendered
}
