//! Timestamp localization and downtime rendering.
//!
//! Alert timestamps arrive as `YYYY-MM-DDTHH:MM:SSZ` UTC strings. Display
//! times are shifted to East Africa Time (UTC+3) and rendered on a 12-hour
//! clock. Downtime is rendered as whole hours and minutes with no rollover
//! into days or weeks.

use chrono::{Duration, NaiveDateTime, Utc};

use crate::error::{AlertError, Result};

/// Wire format for alert timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Display offset from UTC, in hours (East Africa Time).
const DISPLAY_OFFSET_HOURS: i64 = 3;

fn parse_utc(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        AlertError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Renders a UTC timestamp as local 12-hour clock time (e.g. "02:15 PM").
///
/// An absent or empty timestamp renders as "N/A".
///
/// # Errors
///
/// Returns [`AlertError::InvalidTimestamp`] when the string does not match
/// the wire format.
pub fn localize(timestamp: Option<&str>) -> Result<String> {
    let Some(value) = timestamp.filter(|v| !v.is_empty()) else {
        return Ok("N/A".to_string());
    };

    let local = parse_utc(value)? + Duration::hours(DISPLAY_OFFSET_HOURS);
    Ok(local.format("%I:%M %p").to_string())
}

/// Renders the elapsed time between `start` and `end` as hours and minutes.
///
/// An absent `start` renders as "N/A". An absent `end` means the condition
/// is still ongoing and the current wall-clock time closes the interval.
/// Both hours and minutes present renders "{h}hrs {m}mins", whole hours
/// render "{h}hrs", and everything else (including zero) renders "{m}mins".
///
/// # Errors
///
/// Returns [`AlertError::InvalidTimestamp`] when either endpoint does not
/// match the wire format.
pub fn downtime(start: Option<&str>, end: Option<&str>) -> Result<String> {
    let Some(start) = start.filter(|v| !v.is_empty()) else {
        return Ok("N/A".to_string());
    };

    let start = parse_utc(start)?;
    let end = match end.filter(|v| !v.is_empty()) {
        Some(value) => parse_utc(value)?,
        None => Utc::now().naive_utc(),
    };

    let elapsed = (end - start).num_seconds();
    let hours = elapsed / 3600;
    let minutes = (elapsed % 3600) / 60;

    Ok(if hours > 0 && minutes > 0 {
        format!("{hours}hrs {minutes}mins")
    } else if hours > 0 {
        format!("{hours}hrs")
    } else {
        format!("{minutes}mins")
    })
}
