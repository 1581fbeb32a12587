//! Task grouping: attach severity, group key, heading and sort order to each
//! task for the active sort mode.
//!
//! Missing deadline data never fails; it lands in the `noDate` / `noPaceClock`
//! group. Completion state is not checked here; callers pass the tasks in scope.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::date_range::{DateGroup, date_group};
use crate::deadlines::CaseDeadlines;
use crate::headings::heading;
use crate::pace::{PaceGroup, pace_group};
use crate::severity::{Severity, SeverityPolicy, severity};
use crate::sort_mode::SortMode;
use crate::sort_order::{date_range_rank, pace_clock_rank, severity_rank};
use crate::task::Task;
use crate::time::ReferenceClock;

/// Bucket a task falls into under the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Severity(Severity),
    Date(DateGroup),
    Pace(PaceGroup),
}

impl GroupKey {
    pub fn tag(self) -> &'static str {
        match self {
            GroupKey::Severity(s) => s.label(),
            GroupKey::Date(g) => g.tag(),
            GroupKey::Pace(g) => g.tag(),
        }
    }

    /// True for `noDate` / `noPaceClock`.
    pub fn is_sentinel(self) -> bool {
        match self {
            GroupKey::Severity(_) => false,
            GroupKey::Date(g) => g.is_sentinel(),
            GroupKey::Pace(g) => g.is_sentinel(),
        }
    }

    pub fn sort_order(self) -> u32 {
        match self {
            GroupKey::Severity(_) => severity_rank(self.tag()),
            GroupKey::Date(_) => date_range_rank(self.tag()),
            GroupKey::Pace(_) => pace_clock_rank(self.tag()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Every deadline bucket for a case, independent of sort mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineGroups {
    pub custody_time_limit: DateGroup,
    pub statutory_time_limit: DateGroup,
    pub time_limit: DateGroup,
    pub hearing_date: DateGroup,
    pub pace_clock: PaceGroup,
}

impl DeadlineGroups {
    pub fn classify(deadlines: &CaseDeadlines, clock: &ReferenceClock) -> Self {
        Self {
            custody_time_limit: date_group(deadlines.custody_time_limit, clock.today()),
            statutory_time_limit: date_group(deadlines.statutory_time_limit, clock.today()),
            time_limit: date_group(
                time_limit_instant(deadlines, clock).map(|at| clock.local_date(at)),
                clock.today(),
            ),
            hearing_date: date_group(
                deadlines.first_hearing.map(|at| clock.local_date(at)),
                clock.today(),
            ),
            pace_clock: pace_group(deadlines.pace_clock, clock.now()),
        }
    }
}

fn time_limit_instant(deadlines: &CaseDeadlines, clock: &ReferenceClock) -> Option<DateTime<Utc>> {
    deadlines.time_limit(clock).map(|limit| limit.at)
}

/// A task with its per-request annotations. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTask {
    #[serde(flatten)]
    pub task: Task,
    pub severity: Severity,
    pub group_key: GroupKey,
    pub group_heading: String,
    pub sort_order: u32,
    /// Instant the active mode grouped on; the due date under `Due date`.
    pub operative_at: Option<DateTime<Utc>>,
    pub deadlines: CaseDeadlines,
}

/// Group key and operative instant for one task under `mode`.
fn select(
    mode: SortMode,
    task: &Task,
    severity: Severity,
    deadlines: &CaseDeadlines,
    clock: &ReferenceClock,
) -> (GroupKey, Option<DateTime<Utc>>) {
    let today = clock.today();
    match mode {
        SortMode::DueDate => (GroupKey::Severity(severity), task.due_date),
        SortMode::PaceClock => (
            GroupKey::Pace(pace_group(deadlines.pace_clock, clock.now())),
            deadlines.pace_clock,
        ),
        SortMode::TimeLimit => {
            let at = time_limit_instant(deadlines, clock);
            let group = date_group(at.map(|a| clock.local_date(a)), today);
            (GroupKey::Date(group), at)
        }
        SortMode::CustodyTimeLimit => {
            let date = deadlines.custody_time_limit;
            (
                GroupKey::Date(date_group(date, today)),
                date.map(|d| clock.end_of_day(d)),
            )
        }
        SortMode::StatutoryTimeLimit => {
            let date = deadlines.statutory_time_limit;
            (
                GroupKey::Date(date_group(date, today)),
                date.map(|d| clock.end_of_day(d)),
            )
        }
        SortMode::HearingDate => {
            let at = deadlines.first_hearing;
            let group = date_group(at.map(|a| clock.local_date(a)), today);
            (GroupKey::Date(group), at)
        }
    }
}

pub fn group_task(
    task: Task,
    mode: SortMode,
    clock: &ReferenceClock,
    policy: &SeverityPolicy,
) -> GroupedTask {
    let severity = severity(&task, clock, policy);
    let deadlines = CaseDeadlines::extract(&task.case);
    let (group_key, operative_at) = select(mode, &task, severity, &deadlines, clock);

    tracing::trace!(task = %task.id, %severity, group = %group_key, "classified task");

    GroupedTask {
        severity,
        group_key,
        group_heading: heading(mode, group_key.tag()).to_string(),
        sort_order: group_key.sort_order(),
        operative_at,
        deadlines,
        task,
    }
}

/// Annotate every task against one shared clock.
pub fn group_tasks(
    tasks: impl IntoIterator<Item = Task>,
    mode: SortMode,
    clock: &ReferenceClock,
    policy: &SeverityPolicy,
) -> Vec<GroupedTask> {
    let grouped: Vec<GroupedTask> = tasks
        .into_iter()
        .map(|t| group_task(t, mode, clock, policy))
        .collect();

    tracing::debug!(mode = %mode, tasks = grouped.len(), today = %clock.today(), "grouped worklist");
    grouped
}
