//! Worklist sort modes. The labels are user-facing and double as query values.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "Due date")]
    DueDate,
    #[serde(rename = "Time limit")]
    TimeLimit,
    #[serde(rename = "Custody time limit")]
    CustodyTimeLimit,
    #[serde(rename = "Statutory time limit")]
    StatutoryTimeLimit,
    #[serde(rename = "PACE clock")]
    PaceClock,
    #[serde(rename = "Hearing date")]
    HearingDate,
}

impl SortMode {
    pub const ALL: [SortMode; 6] = [
        SortMode::DueDate,
        SortMode::TimeLimit,
        SortMode::CustodyTimeLimit,
        SortMode::StatutoryTimeLimit,
        SortMode::PaceClock,
        SortMode::HearingDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::DueDate => "Due date",
            SortMode::TimeLimit => "Time limit",
            SortMode::CustodyTimeLimit => "Custody time limit",
            SortMode::StatutoryTimeLimit => "Statutory time limit",
            SortMode::PaceClock => "PACE clock",
            SortMode::HearingDate => "Hearing date",
        }
    }

    /// Exact, case-sensitive match on the label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Resolve a possibly user-supplied value. Anything unrecognised (or absent)
    /// is treated as "Due date".
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            None => SortMode::DueDate,
            Some(v) => Self::from_label(v).unwrap_or_else(|| {
                tracing::debug!(value = v, "unrecognised sort mode, using Due date");
                SortMode::DueDate
            }),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
