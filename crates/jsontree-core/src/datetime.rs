//! Date/time text formats.
//!
//! Date/time values are stored in JSON as strings. Writing always uses one
//! canonical ISO-8601 form with millisecond fractions and a zone marker
//! (`2024-03-01T12:30:00.000Z`, `2024-03-01T12:30:00.000+02:00`). Reading
//! accepts:
//!
//! - RFC 3339, with or without fractional seconds
//! - ISO date-times with a `+HHMM` offset or no offset (taken as UTC)
//! - date-only `YYYY-MM-DD` (midnight UTC)
//! - RFC 2822
//! - the legacy `/Date(ms)/` and `/Date(ms+HHMM)/` form, where `ms` counts
//!   milliseconds since the Unix epoch in UTC and the suffix is the offset

use crate::error::{JsonError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

pub fn format_utc(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_offset(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, false)
}

pub fn parse_utc(text: &str) -> Result<DateTime<Utc>> {
    parse_offset(text).map(|dt| dt.with_timezone(&Utc))
}

pub fn parse_offset(text: &str) -> Result<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Some(inner) = text
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        return parse_legacy(inner).ok_or_else(|| invalid(text));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt);
    }
    Err(invalid(text))
}

/// `ms`, `ms+HHMM` or `ms-HHMM`; `ms` itself may be negative.
fn parse_legacy(inner: &str) -> Option<DateTime<FixedOffset>> {
    let split = inner
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '+' || c == '-')
        .map(|(i, _)| i);
    let (millis, offset) = match split {
        Some(i) => (&inner[..i], Some(&inner[i..])),
        None => (inner, None),
    };
    let millis: i64 = millis.parse().ok()?;
    let utc = DateTime::from_timestamp_millis(millis)?;
    let offset = match offset {
        Some(text) => {
            if text.len() != 5 || !text[1..].bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let hours: i32 = text[1..3].parse().ok()?;
            let minutes: i32 = text[3..5].parse().ok()?;
            let seconds = hours * 3600 + minutes * 60;
            let seconds = if text.starts_with('-') { -seconds } else { seconds };
            FixedOffset::east_opt(seconds)?
        }
        None => FixedOffset::east_opt(0)?,
    };
    Some(utc.with_timezone(&offset))
}

fn invalid(text: &str) -> JsonError {
    JsonError::format(format!("\"{text}\" is not a recognized date/time"))
}
