//! Day-granularity buckets for CTL, STL, generic time limit and hearing dates.
//!
//! Weeks end on Sunday. On a Sunday the current week is just that day.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateGroup {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    Later,
    /// No deadline of the kind being grouped. Never a filter target.
    NoDate,
}

impl DateGroup {
    /// Chronological bucket order, sentinel last.
    pub const ALL: [DateGroup; 7] = [
        DateGroup::Overdue,
        DateGroup::Today,
        DateGroup::Tomorrow,
        DateGroup::ThisWeek,
        DateGroup::NextWeek,
        DateGroup::Later,
        DateGroup::NoDate,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            DateGroup::Overdue => "overdue",
            DateGroup::Today => "today",
            DateGroup::Tomorrow => "tomorrow",
            DateGroup::ThisWeek => "thisWeek",
            DateGroup::NextWeek => "nextWeek",
            DateGroup::Later => "later",
            DateGroup::NoDate => "noDate",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.tag() == tag)
    }

    /// Parse a filter value. The `noDate` sentinel is not a range and is rejected.
    pub fn parse_range(tag: &str) -> Option<Self> {
        Self::from_tag(tag).filter(|g| !g.is_sentinel())
    }

    pub fn is_sentinel(self) -> bool {
        self == DateGroup::NoDate
    }

    /// 1-based position in the chronological sequence.
    pub fn ordinal(self) -> u32 {
        self as u32 + 1
    }
}

impl fmt::Display for DateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The Sunday that closes the week containing `today` (today itself on a Sunday).
pub fn end_of_current_week(today: NaiveDate) -> NaiveDate {
    let from_sunday = i64::from(today.weekday().num_days_from_sunday());
    today + Duration::days((7 - from_sunday) % 7)
}

/// The Sunday after [`end_of_current_week`].
pub fn end_of_next_week(today: NaiveDate) -> NaiveDate {
    end_of_current_week(today) + Duration::days(7)
}

/// Bucket a date-only deadline relative to `today`.
pub fn date_group(deadline: Option<NaiveDate>, today: NaiveDate) -> DateGroup {
    let Some(deadline) = deadline else {
        return DateGroup::NoDate;
    };

    if deadline < today {
        DateGroup::Overdue
    } else if deadline == today {
        DateGroup::Today
    } else if today.succ_opt() == Some(deadline) {
        DateGroup::Tomorrow
    } else if deadline <= end_of_current_week(today) {
        DateGroup::ThisWeek
    } else if deadline <= end_of_next_week(today) {
        DateGroup::NextWeek
    } else {
        DateGroup::Later
    }
}
