//! Rank tables for worklist ordering, looked up by group key.
//!
//! Unknown keys rank [`UNRANKED`] so they sort last instead of failing.

use crate::date_range::DateGroup;

pub const UNRANKED: u32 = 999;

pub const SEVERITY_ORDER: &[(&str, u32)] = &[
    ("Critically overdue", 1),
    ("Overdue", 2),
    ("Due soon", 3),
    ("Not due yet", 4),
];

pub const PACE_CLOCK_ORDER: &[(&str, u32)] = &[
    ("expired", 1),
    ("lessThan1Hour", 2),
    ("lessThan2Hours", 3),
    ("lessThan3Hours", 4),
    ("moreThan3Hours", 5),
    ("noPaceClock", 6),
];

pub fn rank(table: &[(&str, u32)], key: &str) -> u32 {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, r)| *r)
        .unwrap_or(UNRANKED)
}

pub fn severity_rank(key: &str) -> u32 {
    rank(SEVERITY_ORDER, key)
}

pub fn pace_clock_rank(key: &str) -> u32 {
    rank(PACE_CLOCK_ORDER, key)
}

/// Date-range keys sort chronologically; there is no separate table.
pub fn date_range_rank(key: &str) -> u32 {
    DateGroup::from_tag(key)
        .map(DateGroup::ordinal)
        .unwrap_or(UNRANKED)
}
