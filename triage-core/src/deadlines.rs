//! Deadline extraction: resolve the custody time limit, statutory time limit,
//! PACE clock and first hearing from a case.
//!
//! Absence is `None`; there are no error paths.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Case;
use crate::time::ReferenceClock;

/// Which deadline won when picking the generic time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLimitKind {
    CustodyTimeLimit,
    StatutoryTimeLimit,
    PaceClock,
}

/// The earliest of a case's CTL, STL and PACE clock, as a comparable instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLimit {
    pub kind: TimeLimitKind,
    pub at: DateTime<Utc>,
}

/// Snapshot of the deadlines a case exposes to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDeadlines {
    pub custody_time_limit: Option<NaiveDate>,
    pub statutory_time_limit: Option<NaiveDate>,
    pub pace_clock: Option<DateTime<Utc>>,
    pub first_hearing: Option<DateTime<Utc>>,
}

impl CaseDeadlines {
    pub fn extract(case: &Case) -> Self {
        Self {
            custody_time_limit: custody_time_limit(case),
            statutory_time_limit: statutory_time_limit(case),
            pace_clock: pace_clock(case),
            first_hearing: first_hearing(case),
        }
    }

    /// Earliest of CTL, STL (both at end of day) and the PACE clock.
    ///
    /// Ties keep the first candidate in CTL, STL, PACE order.
    pub fn time_limit(&self, clock: &ReferenceClock) -> Option<TimeLimit> {
        let candidates = [
            self.custody_time_limit.map(|d| TimeLimit {
                kind: TimeLimitKind::CustodyTimeLimit,
                at: clock.end_of_day(d),
            }),
            self.statutory_time_limit.map(|d| TimeLimit {
                kind: TimeLimitKind::StatutoryTimeLimit,
                at: clock.end_of_day(d),
            }),
            self.pace_clock.map(|at| TimeLimit {
                kind: TimeLimitKind::PaceClock,
                at,
            }),
        ];

        candidates
            .into_iter()
            .flatten()
            .min_by_key(|limit| limit.at)
    }
}

/// First custody time limit found on any charge of any defendant.
pub fn custody_time_limit(case: &Case) -> Option<NaiveDate> {
    case.defendants
        .iter()
        .flat_map(|d| d.charges.iter())
        .find_map(|c| c.custody_time_limit)
}

/// First statutory time limit found on any charge of any defendant.
pub fn statutory_time_limit(case: &Case) -> Option<NaiveDate> {
    case.defendants
        .iter()
        .flat_map(|d| d.charges.iter())
        .find_map(|c| c.statutory_time_limit)
}

/// First PACE clock across defendants.
pub fn pace_clock(case: &Case) -> Option<DateTime<Utc>> {
    case.defendants.iter().find_map(|d| d.pace_clock)
}

/// Earliest hearing start on the case.
pub fn first_hearing(case: &Case) -> Option<DateTime<Utc>> {
    case.hearings.iter().map(|h| h.start).min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Charge, Defendant};
    use crate::time::DEFAULT_TIMEZONE;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_case_has_no_deadlines() {
        let deadlines = CaseDeadlines::extract(&Case::new("c1"));
        assert_eq!(deadlines, CaseDeadlines::default());
    }

    #[test]
    fn finds_limits_on_later_defendants_and_charges() {
        let case = Case::new("c1")
            .with_defendant(Defendant::new("d1").with_charge(Charge::new("ch1")))
            .with_defendant(
                Defendant::new("d2")
                    .with_charge(Charge::new("ch2"))
                    .with_charge(Charge::new("ch3").with_custody_time_limit(date(2026, 11, 2))),
            )
            .with_defendant(
                Defendant::new("d3")
                    .with_charge(Charge::new("ch4").with_statutory_time_limit(date(2026, 12, 1))),
            );

        assert_eq!(custody_time_limit(&case), Some(date(2026, 11, 2)));
        assert_eq!(statutory_time_limit(&case), Some(date(2026, 12, 1)));
        assert_eq!(pace_clock(&case), None);
    }

    #[test]
    fn both_limits_on_one_charge_are_read_independently() {
        let charge = Charge::new("ch1")
            .with_custody_time_limit(date(2026, 11, 2))
            .with_statutory_time_limit(date(2026, 11, 9));
        let case = Case::new("c1").with_defendant(Defendant::new("d1").with_charge(charge));

        let deadlines = CaseDeadlines::extract(&case);
        assert_eq!(deadlines.custody_time_limit, Some(date(2026, 11, 2)));
        assert_eq!(deadlines.statutory_time_limit, Some(date(2026, 11, 9)));
    }

    #[test]
    fn first_hearing_is_the_earliest_start() {
        let early = Utc.with_ymd_and_hms(2026, 10, 20, 10, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 11, 20, 10, 0, 0).unwrap();
        let case = Case::new("c1").with_hearing(late).with_hearing(early);
        assert_eq!(first_hearing(&case), Some(early));
    }

    #[test]
    fn time_limit_picks_earliest_including_pace() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let clock = ReferenceClock::at(now, DEFAULT_TIMEZONE);

        // PACE at 10:00 on the CTL day beats the CTL's end of day.
        let pace = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let deadlines = CaseDeadlines {
            custody_time_limit: Some(date(2026, 10, 18)),
            statutory_time_limit: Some(date(2026, 10, 25)),
            pace_clock: Some(pace),
            first_hearing: None,
        };
        let limit = deadlines.time_limit(&clock).unwrap();
        assert_eq!(limit.kind, TimeLimitKind::PaceClock);
        assert_eq!(limit.at, pace);

        let no_pace = CaseDeadlines {
            pace_clock: None,
            ..deadlines
        };
        let limit = no_pace.time_limit(&clock).unwrap();
        assert_eq!(limit.kind, TimeLimitKind::CustodyTimeLimit);
        assert_eq!(clock.local_date(limit.at), date(2026, 10, 18));

        assert_eq!(CaseDeadlines::default().time_limit(&clock), None);
    }

    #[test]
    fn time_limit_tie_keeps_custody_first() {
        let clock = ReferenceClock::at(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
            DEFAULT_TIMEZONE,
        );
        let deadlines = CaseDeadlines {
            custody_time_limit: Some(date(2026, 10, 20)),
            statutory_time_limit: Some(date(2026, 10, 20)),
            ..CaseDeadlines::default()
        };
        let limit = deadlines.time_limit(&clock).unwrap();
        assert_eq!(limit.kind, TimeLimitKind::CustodyTimeLimit);
    }
}
