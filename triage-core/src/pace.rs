//! Hour-granularity buckets for the PACE detention clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaceGroup {
    Expired,
    LessThan1Hour,
    LessThan2Hours,
    LessThan3Hours,
    MoreThan3Hours,
    /// No PACE clock on the case. Never a filter target.
    NoPaceClock,
}

impl PaceGroup {
    pub const ALL: [PaceGroup; 6] = [
        PaceGroup::Expired,
        PaceGroup::LessThan1Hour,
        PaceGroup::LessThan2Hours,
        PaceGroup::LessThan3Hours,
        PaceGroup::MoreThan3Hours,
        PaceGroup::NoPaceClock,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PaceGroup::Expired => "expired",
            PaceGroup::LessThan1Hour => "lessThan1Hour",
            PaceGroup::LessThan2Hours => "lessThan2Hours",
            PaceGroup::LessThan3Hours => "lessThan3Hours",
            PaceGroup::MoreThan3Hours => "moreThan3Hours",
            PaceGroup::NoPaceClock => "noPaceClock",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.tag() == tag)
    }

    /// Parse a filter value. `noPaceClock` is rejected.
    pub fn parse_range(tag: &str) -> Option<Self> {
        Self::from_tag(tag).filter(|g| !g.is_sentinel())
    }

    pub fn is_sentinel(self) -> bool {
        self == PaceGroup::NoPaceClock
    }
}

impl fmt::Display for PaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Fractional hours from `now` until `at`; negative once passed.
pub fn hours_remaining(at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (at - now).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

pub fn pace_group(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> PaceGroup {
    let Some(at) = at else {
        return PaceGroup::NoPaceClock;
    };

    let hours = hours_remaining(at, now);
    if hours < 0.0 {
        PaceGroup::Expired
    } else if hours < 1.0 {
        PaceGroup::LessThan1Hour
    } else if hours < 2.0 {
        PaceGroup::LessThan2Hours
    } else if hours < 3.0 {
        PaceGroup::LessThan3Hours
    } else {
        PaceGroup::MoreThan3Hours
    }
}
