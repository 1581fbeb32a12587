//! Time utilities: the per-request reference clock and timezone-aware
//! deadline normalisation.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone used when nothing else is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::London;

/// Parse an IANA zone name such as "Europe/London".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse a local wall-clock time like "2026-02-20 23:59" (or "2026-02-20T23:59")
/// in `tz`, returning UTC.
pub fn parse_local_datetime_to_utc(local: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Last representable millisecond of `date` (23:59:59.999) in `tz`, as UTC.
///
/// Date-only limits are stored this way so they compare correctly against
/// hour-granularity deadlines.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let ndt = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid wall-clock time");

    tz.from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&ndt))
}

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// "Now" and "today" for one listing.
///
/// Built once per request and passed to every classification so that all tasks
/// in a listing are bucketed against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    now: DateTime<Utc>,
    tz: Tz,
    today: NaiveDate,
}

impl ReferenceClock {
    pub fn at(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            now,
            tz,
            today: local_date(now, tz),
        }
    }

    /// Read the system clock. Call this once per request.
    pub fn system(tz: Tz) -> Self {
        Self::at(Utc::now(), tz)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        local_date(instant, self.tz)
    }

    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        end_of_day(date, self.tz)
    }
}
