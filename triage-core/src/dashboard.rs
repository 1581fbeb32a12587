//! Per-bucket counts for a user's dashboard.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::date_range::DateGroup;
use crate::deadlines::CaseDeadlines;
use crate::grouping::DeadlineGroups;
use crate::pace::PaceGroup;
use crate::severity::{Severity, SeverityPolicy, severity};
use crate::task::Task;
use crate::time::ReferenceClock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub custody_time_limit: BTreeMap<DateGroup, usize>,
    pub statutory_time_limit: BTreeMap<DateGroup, usize>,
    pub hearing_date: BTreeMap<DateGroup, usize>,
    pub pace_clock: BTreeMap<PaceGroup, usize>,
}

impl DashboardSummary {
    /// Count incomplete tasks, optionally only those owned by `owner`.
    pub fn build<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        owner: Option<&str>,
        clock: &ReferenceClock,
        policy: &SeverityPolicy,
    ) -> Self {
        let mut summary = Self::default();

        for task in tasks {
            if task.is_completed() {
                continue;
            }
            if owner.is_some() && task.owner.as_deref() != owner {
                continue;
            }

            summary.total += 1;
            *summary.by_severity.entry(severity(task, clock, policy)).or_default() += 1;

            let groups = DeadlineGroups::classify(&CaseDeadlines::extract(&task.case), clock);
            *summary.custody_time_limit.entry(groups.custody_time_limit).or_default() += 1;
            *summary.statutory_time_limit.entry(groups.statutory_time_limit).or_default() += 1;
            *summary.hearing_date.entry(groups.hearing_date).or_default() += 1;
            *summary.pace_clock.entry(groups.pace_clock).or_default() += 1;
        }

        tracing::debug!(total = summary.total, "built dashboard summary");
        summary
    }

    pub fn severity_count(&self, s: Severity) -> usize {
        self.by_severity.get(&s).copied().unwrap_or(0)
    }

    pub fn custody_count(&self, g: DateGroup) -> usize {
        self.custody_time_limit.get(&g).copied().unwrap_or(0)
    }

    pub fn statutory_count(&self, g: DateGroup) -> usize {
        self.statutory_time_limit.get(&g).copied().unwrap_or(0)
    }

    pub fn hearing_count(&self, g: DateGroup) -> usize {
        self.hearing_date.get(&g).copied().unwrap_or(0)
    }

    pub fn pace_count(&self, g: PaceGroup) -> usize {
        self.pace_clock.get(&g).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Case, Charge, Defendant};
    use crate::time::DEFAULT_TIMEZONE;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn clock() -> ReferenceClock {
        ReferenceClock::at(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
            DEFAULT_TIMEZONE,
        )
    }

    #[test]
    fn counts_incomplete_tasks_per_bucket() {
        let c = clock();
        let stl = Case::new("c1").with_defendant(
            Defendant::new("d1").with_charge(
                Charge::new("ch1").with_statutory_time_limit(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()),
            ),
        );
        let pace = Case::new("c2")
            .with_defendant(Defendant::new("d2").with_pace_clock(c.now() + Duration::minutes(150)));
        let tasks = vec![
            Task::new("t1", "a", stl.clone()).with_owner("alex").with_due_date(c.now()),
            Task::new("t2", "b", pace).with_owner("alex"),
            Task::new("t3", "c", stl)
                .with_owner("alex")
                .with_completed_at(c.now() - Duration::hours(1)),
            Task::new("t4", "d", Case::new("c3")).with_owner("sam"),
        ];

        let s = DashboardSummary::build(&tasks, Some("alex"), &c, &SeverityPolicy::default());
        assert_eq!(s.total, 2);
        assert_eq!(s.severity_count(Severity::Overdue), 1);
        assert_eq!(s.severity_count(Severity::NotDueYet), 1);
        assert_eq!(s.statutory_count(DateGroup::Tomorrow), 1);
        assert_eq!(s.statutory_count(DateGroup::NoDate), 1);
        assert_eq!(s.custody_count(DateGroup::NoDate), 2);
        assert_eq!(s.hearing_count(DateGroup::NoDate), 2);
        assert_eq!(s.pace_count(PaceGroup::LessThan3Hours), 1);
        assert_eq!(s.pace_count(PaceGroup::NoPaceClock), 1);

        let everyone = DashboardSummary::build(&tasks, None, &c, &SeverityPolicy::default());
        assert_eq!(everyone.total, 3);
    }

    #[test]
    fn serialises_bucket_tags() {
        let s = DashboardSummary::build(
            &[Task::new("t1", "a", Case::new("c1"))],
            None,
            &clock(),
            &SeverityPolicy::default(),
        );
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["bySeverity"]["Not due yet"], 1);
        assert_eq!(json["paceClock"]["noPaceClock"], 1);
        assert_eq!(json["custodyTimeLimit"]["noDate"], 1);
    }
}
