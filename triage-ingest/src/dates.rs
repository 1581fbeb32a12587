//! Date parsing at the storage boundary.
//!
//! Blank strings mean "absent". Anything else must parse, or the record is
//! rejected with the field named in the error.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use triage_core::time::{end_of_day, parse_local_datetime_to_utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid date '{value}' (expected YYYY-MM-DD)"))
}

/// RFC 3339, local `YYYY-MM-DD HH:MM` in `tz`, or a bare date (end of that day in `tz`).
pub fn parse_instant(value: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(end_of_day(date, tz));
    }
    parse_local_datetime_to_utc(value, tz)
}

pub fn optional_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    non_blank(value)
        .map(parse_date)
        .transpose()
        .with_context(|| format!("field {field}"))
}

pub fn optional_instant(value: Option<&str>, tz: Tz, field: &str) -> Result<Option<DateTime<Utc>>> {
    non_blank(value)
        .map(|v| parse_instant(v, tz))
        .transpose()
        .with_context(|| format!("field {field}"))
}
