//! Worklist ordering, sectioning and pagination.

use serde::Serialize;
use std::cmp::Ordering;

use crate::grouping::{GroupKey, GroupedTask};

fn compare(a: &GroupedTask, b: &GroupedTask) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| match (a.operative_at, b.operative_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            // Absent instants go last within a group.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.task.id.cmp(&b.task.id))
}

/// Order by sort order, then the operative instant, then task id.
pub fn sort_worklist(tasks: &mut [GroupedTask]) {
    tasks.sort_by(compare);
}

/// Consecutive run of tasks sharing a group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<'a> {
    pub group_key: GroupKey,
    pub heading: &'a str,
    pub tasks: Vec<&'a GroupedTask>,
}

/// Fold an already sorted worklist into sections for rendering.
pub fn group_sections(tasks: &[GroupedTask]) -> Vec<Section<'_>> {
    let mut out: Vec<Section<'_>> = Vec::new();
    for t in tasks {
        match out.last_mut() {
            Some(section) if section.group_key == t.group_key => section.tasks.push(t),
            _ => out.push(Section {
                group_key: t.group_key,
                heading: &t.group_heading,
                tasks: vec![t],
            }),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}

/// Slice out one page. Page 0 is treated as page 1 and a zero page size as 1;
/// pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: &items[start..end],
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_tasks;
    use crate::severity::{Severity, SeverityPolicy};
    use crate::sort_mode::SortMode;
    use crate::task::{Case, Defendant, Task};
    use crate::time::{DEFAULT_TIMEZONE, ReferenceClock};
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> ReferenceClock {
        ReferenceClock::at(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
            DEFAULT_TIMEZONE,
        )
    }

    #[test]
    fn sorts_by_rank_then_instant_then_id() {
        let c = clock();
        let tasks = vec![
            Task::new("b", "later", Case::new("c")).with_due_date(c.now() + Duration::days(10)),
            Task::new("a", "undated", Case::new("c")),
            Task::new("d", "critical-recent", Case::new("c")).with_due_date(c.now() - Duration::days(1)),
            Task::new("c", "critical-old", Case::new("c")).with_due_date(c.now() - Duration::days(6)),
        ];
        let mut grouped = group_tasks(tasks, SortMode::DueDate, &c, &SeverityPolicy::default());
        sort_worklist(&mut grouped);
        let ids: Vec<&str> = grouped.iter().map(|t| t.task.id.as_str()).collect();
        // Both "Not due yet": dated before undated.
        assert_eq!(ids, vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn sections_follow_group_runs() {
        let c = clock();
        let pace = |mins: i64| {
            Case::new("c").with_defendant(Defendant::new("d").with_pace_clock(c.now() + Duration::minutes(mins)))
        };
        let tasks = vec![
            Task::new("t1", "x", pace(200)),
            Task::new("t2", "x", pace(20)),
            Task::new("t3", "x", pace(40)),
            Task::new("t4", "x", Case::new("c")),
        ];
        let mut grouped = group_tasks(tasks, SortMode::PaceClock, &c, &SeverityPolicy::default());
        sort_worklist(&mut grouped);
        let sections = group_sections(&grouped);
        let headings: Vec<&str> = sections.iter().map(|s| s.heading).collect();
        assert_eq!(headings, vec!["Less than 1 hour", "More than 3 hours", "No PACE clock"]);
        assert_eq!(sections[0].tasks.len(), 2);
        assert_eq!(sections[0].tasks[0].task.id, "t2");
        assert!(sections.iter().all(|s| s.tasks.iter().all(|t| t.severity == Severity::NotDueYet)));
    }

    #[test]
    fn pagination_edges() {
        let items: Vec<u32> = (1..=7).collect();

        let p = paginate(&items, 1, 3);
        assert_eq!(p.items, &[1, 2, 3]);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert!(!p.has_previous());

        let last = paginate(&items, 3, 3);
        assert_eq!(last.items, &[7]);
        assert!(!last.has_next());

        let past = paginate(&items, 9, 3);
        assert!(past.items.is_empty());
        assert_eq!(past.total_items, 7);

        let zero = paginate(&items, 0, 0);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, &[1]);

        let empty: Vec<u32> = Vec::new();
        let p = paginate(&empty, 1, 25);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next());
    }
}
