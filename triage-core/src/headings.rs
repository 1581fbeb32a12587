//! Group headings, keyed by sort mode and then group key.
//!
//! A key missing from a mode's table is echoed back unchanged.

use crate::sort_mode::SortMode;

type HeadingTable = &'static [(&'static str, &'static str)];

const TIME_LIMIT: HeadingTable = &[
    ("overdue", "Time limit expired"),
    ("today", "Time limit ends today"),
    ("tomorrow", "Time limit ends tomorrow"),
    ("thisWeek", "Time limit ends this week"),
    ("nextWeek", "Time limit ends next week"),
    ("later", "Time limit ends later"),
    ("noDate", "No time limit"),
];

const CUSTODY_TIME_LIMIT: HeadingTable = &[
    ("overdue", "Time limit expired"),
    ("today", "Custody time limit ends today"),
    ("tomorrow", "Custody time limit ends tomorrow"),
    ("thisWeek", "Custody time limit ends this week"),
    ("nextWeek", "Custody time limit ends next week"),
    ("later", "Custody time limit ends later"),
    ("noDate", "No custody time limit"),
];

const STATUTORY_TIME_LIMIT: HeadingTable = &[
    ("overdue", "Time limit expired"),
    ("today", "Statutory time limit ends today"),
    ("tomorrow", "Statutory time limit ends tomorrow"),
    ("thisWeek", "Statutory time limit ends this week"),
    ("nextWeek", "Statutory time limit ends next week"),
    ("later", "Statutory time limit ends later"),
    ("noDate", "No statutory time limit"),
];

const HEARING_DATE: HeadingTable = &[
    ("overdue", "Hearing date has passed"),
    ("today", "Hearing is today"),
    ("tomorrow", "Hearing is tomorrow"),
    ("thisWeek", "Hearing is this week"),
    ("nextWeek", "Hearing is next week"),
    ("later", "Hearing is later"),
    ("noDate", "No hearing date"),
];

const PACE_CLOCK: HeadingTable = &[
    ("expired", "PACE clock expired"),
    ("lessThan1Hour", "Less than 1 hour"),
    ("lessThan2Hours", "Less than 2 hours"),
    ("lessThan3Hours", "Less than 3 hours"),
    ("moreThan3Hours", "More than 3 hours"),
    ("noPaceClock", "No PACE clock"),
];

/// Heading table for a mode. `Due date` has none: severity labels are used verbatim.
fn table(mode: SortMode) -> Option<HeadingTable> {
    match mode {
        SortMode::DueDate => None,
        SortMode::TimeLimit => Some(TIME_LIMIT),
        SortMode::CustodyTimeLimit => Some(CUSTODY_TIME_LIMIT),
        SortMode::StatutoryTimeLimit => Some(STATUTORY_TIME_LIMIT),
        SortMode::PaceClock => Some(PACE_CLOCK),
        SortMode::HearingDate => Some(HEARING_DATE),
    }
}

pub fn heading<'a>(mode: SortMode, key: &'a str) -> &'a str {
    let Some(entries) = table(mode) else {
        return key;
    };

    match entries.iter().find(|(k, _)| *k == key) {
        Some((_, text)) => *text,
        None => {
            tracing::trace!(mode = %mode, key, "no heading for group key");
            key
        }
    }
}
