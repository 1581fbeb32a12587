//! Worklist filters applied after grouping.
//!
//! Values within one dimension are alternatives; dimensions must all match.
//! A range filter never matches a task that has no deadline of that kind.

use serde::{Deserialize, Serialize};

use crate::date_range::DateGroup;
use crate::grouping::{DeadlineGroups, GroupedTask};
use crate::pace::PaceGroup;
use crate::severity::Severity;
use crate::time::ReferenceClock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklistFilter {
    #[serde(default)]
    pub severities: Vec<Severity>,
    #[serde(default)]
    pub custody_time_limit: Vec<DateGroup>,
    #[serde(default)]
    pub statutory_time_limit: Vec<DateGroup>,
    #[serde(default)]
    pub time_limit: Vec<DateGroup>,
    #[serde(default)]
    pub hearing_date: Vec<DateGroup>,
    #[serde(default)]
    pub pace_clock: Vec<PaceGroup>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Parse query values into date ranges, dropping unknown values and `noDate`.
pub fn parse_date_ranges<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<DateGroup> {
    values.into_iter().filter_map(DateGroup::parse_range).collect()
}

/// Parse query values into PACE ranges, dropping unknown values and `noPaceClock`.
pub fn parse_pace_ranges<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<PaceGroup> {
    values.into_iter().filter_map(PaceGroup::parse_range).collect()
}

pub fn parse_severities<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<Severity> {
    values.into_iter().filter_map(Severity::from_label).collect()
}

fn date_matches(wanted: &[DateGroup], actual: DateGroup) -> bool {
    wanted.is_empty() || (!actual.is_sentinel() && wanted.contains(&actual))
}

fn pace_matches(wanted: &[PaceGroup], actual: PaceGroup) -> bool {
    wanted.is_empty() || (!actual.is_sentinel() && wanted.contains(&actual))
}

impl WorklistFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_range_filters(&self) -> bool {
        !(self.custody_time_limit.is_empty()
            && self.statutory_time_limit.is_empty()
            && self.time_limit.is_empty()
            && self.hearing_date.is_empty()
            && self.pace_clock.is_empty())
    }

    pub fn matches(&self, task: &GroupedTask, clock: &ReferenceClock) -> bool {
        if !self.severities.is_empty() && !self.severities.contains(&task.severity) {
            return false;
        }
        if let Some(owner) = &self.owner {
            if task.task.owner.as_deref() != Some(owner.as_str()) {
                return false;
            }
        }
        if !self.has_range_filters() {
            return true;
        }

        let groups = DeadlineGroups::classify(&task.deadlines, clock);
        date_matches(&self.custody_time_limit, groups.custody_time_limit)
            && date_matches(&self.statutory_time_limit, groups.statutory_time_limit)
            && date_matches(&self.time_limit, groups.time_limit)
            && date_matches(&self.hearing_date, groups.hearing_date)
            && pace_matches(&self.pace_clock, groups.pace_clock)
    }

    /// Keep the tasks matching this filter, preserving order.
    pub fn apply(&self, tasks: Vec<GroupedTask>, clock: &ReferenceClock) -> Vec<GroupedTask> {
        if self.is_empty() {
            return tasks;
        }
        let before = tasks.len();
        let kept: Vec<GroupedTask> = tasks.into_iter().filter(|t| self.matches(t, clock)).collect();
        tracing::debug!(before, after = kept.len(), "filtered worklist");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_tasks;
    use crate::severity::SeverityPolicy;
    use crate::sort_mode::SortMode;
    use crate::task::{Case, Charge, Defendant, Task};
    use crate::time::DEFAULT_TIMEZONE;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn clock() -> ReferenceClock {
        ReferenceClock::at(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
            DEFAULT_TIMEZONE,
        )
    }

    fn fixtures() -> Vec<GroupedTask> {
        let c = clock();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let ctl_today = Case::new("c1").with_defendant(
            Defendant::new("d1").with_charge(Charge::new("ch1").with_custody_time_limit(today)),
        );
        let pace_soon = Case::new("c2")
            .with_defendant(Defendant::new("d2").with_pace_clock(c.now() + Duration::minutes(30)));
        let tasks = vec![
            Task::new("ctl", "Custody review", ctl_today)
                .with_due_date(c.now())
                .with_owner("alex"),
            Task::new("pace", "Charging decision", pace_soon).with_owner("sam"),
            Task::new("none", "File note", Case::new("c3"))
                .with_due_date(c.now() - Duration::days(4)),
        ];
        group_tasks(tasks, SortMode::DueDate, &c, &SeverityPolicy::default())
    }

    fn ids(tasks: &[GroupedTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.task.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let kept = WorklistFilter::default().apply(fixtures(), &clock());
        assert_eq!(ids(&kept), vec!["ctl", "pace", "none"]);
    }

    #[test]
    fn range_filter_excludes_tasks_without_that_deadline() {
        let f = WorklistFilter {
            custody_time_limit: vec![DateGroup::Today],
            ..WorklistFilter::default()
        };
        assert_eq!(ids(&f.apply(fixtures(), &clock())), vec!["ctl"]);

        // Every concrete range, none of which may pick up the task with no limits.
        let f = WorklistFilter {
            custody_time_limit: DateGroup::ALL.into_iter().filter(|g| !g.is_sentinel()).collect(),
            ..WorklistFilter::default()
        };
        assert!(!ids(&f.apply(fixtures(), &clock())).contains(&"none"));
    }

    #[test]
    fn sentinel_values_never_parse_as_filters() {
        assert_eq!(parse_date_ranges(["noDate", "today", "bogus"]), vec![DateGroup::Today]);
        assert_eq!(parse_pace_ranges(["noPaceClock"]), Vec::<PaceGroup>::new());
        assert_eq!(parse_severities(["Overdue", "overdue"]), vec![Severity::Overdue]);
    }

    #[test]
    fn dimensions_are_anded() {
        let f = WorklistFilter {
            pace_clock: vec![PaceGroup::LessThan1Hour],
            owner: Some("alex".to_string()),
            ..WorklistFilter::default()
        };
        assert!(f.apply(fixtures(), &clock()).is_empty());

        let f = WorklistFilter {
            pace_clock: vec![PaceGroup::LessThan1Hour],
            owner: Some("sam".to_string()),
            ..WorklistFilter::default()
        };
        assert_eq!(ids(&f.apply(fixtures(), &clock())), vec!["pace"]);
    }

    #[test]
    fn severity_filter_works_in_any_mode() {
        let f = WorklistFilter {
            severities: vec![Severity::CriticallyOverdue, Severity::Overdue],
            ..WorklistFilter::default()
        };
        assert_eq!(ids(&f.apply(fixtures(), &clock())), vec!["ctl", "none"]);
    }

    #[test]
    fn time_limit_filter_sees_pace_as_a_date() {
        let f = WorklistFilter {
            time_limit: vec![DateGroup::Today],
            ..WorklistFilter::default()
        };
        assert_eq!(ids(&f.apply(fixtures(), &clock())), vec!["ctl", "pace"]);
    }
}
