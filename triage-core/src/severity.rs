//! Four-tier task severity, driven by whole days until the task's due date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::Task;
use crate::time::ReferenceClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "Critically overdue")]
    CriticallyOverdue,
    #[serde(rename = "Overdue")]
    Overdue,
    #[serde(rename = "Due soon")]
    DueSoon,
    #[serde(rename = "Not due yet")]
    NotDueYet,
}

impl Severity {
    /// Most urgent first.
    pub const ALL: [Severity; 4] = [
        Severity::CriticallyOverdue,
        Severity::Overdue,
        Severity::DueSoon,
        Severity::NotDueYet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::CriticallyOverdue => "Critically overdue",
            Severity::Overdue => "Overdue",
            Severity::DueSoon => "Due soon",
            Severity::NotDueYet => "Not due yet",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Day thresholds for the four tiers. Each bound is exclusive:
/// `days < critically_overdue_below` is critically overdue, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPolicy {
    pub critically_overdue_below: i64,
    pub overdue_below: i64,
    pub due_soon_below: i64,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            critically_overdue_below: 0,
            overdue_below: 2,
            due_soon_below: 5,
        }
    }
}

impl SeverityPolicy {
    pub fn validate(&self) -> Result<(), String> {
        if self.critically_overdue_below > self.overdue_below
            || self.overdue_below > self.due_soon_below
        {
            return Err(format!(
                "severity thresholds must be non-decreasing (got {}, {}, {})",
                self.critically_overdue_below, self.overdue_below, self.due_soon_below
            ));
        }
        Ok(())
    }

    pub fn classify_days(&self, days_remaining: Option<i64>) -> Severity {
        match days_remaining {
            Some(d) if d < self.critically_overdue_below => Severity::CriticallyOverdue,
            Some(d) if d < self.overdue_below => Severity::Overdue,
            Some(d) if d < self.due_soon_below => Severity::DueSoon,
            _ => Severity::NotDueYet,
        }
    }
}

/// Whole calendar days from the clock's today to the local date of `due`.
pub fn days_remaining(due: DateTime<Utc>, clock: &ReferenceClock) -> i64 {
    (clock.local_date(due) - clock.today()).num_days()
}

pub fn classify_due_date(
    due: Option<DateTime<Utc>>,
    clock: &ReferenceClock,
    policy: &SeverityPolicy,
) -> Severity {
    policy.classify_days(due.map(|d| days_remaining(d, clock)))
}

/// Severity of a task from its own due date (not the case deadlines).
pub fn severity(task: &Task, clock: &ReferenceClock, policy: &SeverityPolicy) -> Severity {
    classify_due_date(task.due_date, clock, policy)
}
