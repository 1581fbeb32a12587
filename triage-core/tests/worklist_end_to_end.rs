use chrono::{Duration, NaiveDate, TimeZone, Utc};
use triage_core::{
    Case, Charge, DateGroup, Defendant, GroupKey, PaceGroup, ReferenceClock, Severity,
    SeverityPolicy, SortMode, Task, WorklistFilter, DEFAULT_TIMEZONE, group_sections, group_tasks,
    paginate, sort_worklist,
};

fn clock() -> ReferenceClock {
    // Friday 2026-10-16, 14:00 BST.
    ReferenceClock::at(
        Utc.with_ymd_and_hms(2026, 10, 16, 13, 0, 0).unwrap(),
        DEFAULT_TIMEZONE,
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three tasks due 3 days ago, today and in 10 days.
#[test]
fn due_date_listing_orders_most_urgent_first() {
    let c = clock();
    let tasks = vec![
        Task::new("later", "Prepare trial bundle", Case::new("c3"))
            .with_due_date(c.now() + Duration::days(10)),
        Task::new("today", "Serve initial details", Case::new("c2")).with_due_date(c.now()),
        Task::new("late", "Review charging advice", Case::new("c1"))
            .with_due_date(c.now() - Duration::days(3)),
    ];

    let mut grouped = group_tasks(tasks, SortMode::DueDate, &c, &SeverityPolicy::default());
    let severities: Vec<Severity> = grouped.iter().map(|t| t.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::NotDueYet, Severity::Overdue, Severity::CriticallyOverdue]
    );

    sort_worklist(&mut grouped);
    let ids: Vec<&str> = grouped.iter().map(|t| t.task.id.as_str()).collect();
    assert_eq!(ids, vec!["late", "today", "later"]);

    let headings: Vec<&str> = group_sections(&grouped).iter().map(|s| s.heading).collect();
    assert_eq!(headings, vec!["Critically overdue", "Overdue", "Not due yet"]);
}

#[test]
fn custody_listing_filters_and_pages() {
    let c = clock();
    let ctl = |d: NaiveDate| {
        Case::new(format!("case-{d}")).with_defendant(
            Defendant::new("d1").with_charge(Charge::new("ch1").with_custody_time_limit(d)),
        )
    };

    let mut tasks: Vec<Task> = (0..12)
        .map(|i| Task::new(format!("t{i:02}"), "CTL review", ctl(date(2026, 10, 16) + Duration::days(i))))
        .collect();
    tasks.push(Task::new("no-ctl", "Chase witness statement", Case::new("c-none")));
    tasks.push(Task::new("expired", "CTL lapsed", ctl(date(2026, 10, 10))));

    let mut grouped = group_tasks(tasks, SortMode::CustodyTimeLimit, &c, &SeverityPolicy::default());
    sort_worklist(&mut grouped);

    let keys: Vec<GroupKey> = grouped.iter().map(|t| t.group_key).collect();
    assert_eq!(keys.first(), Some(&GroupKey::Date(DateGroup::Overdue)));
    assert_eq!(keys.last(), Some(&GroupKey::Date(DateGroup::NoDate)));
    assert_eq!(grouped[0].group_heading, "Time limit expired");

    // Today (Fri) .. Sun are today/tomorrow/thisWeek; the next 7 days are nextWeek.
    let filter = WorklistFilter {
        custody_time_limit: vec![DateGroup::NextWeek],
        ..WorklistFilter::default()
    };
    let next_week = filter.apply(grouped.clone(), &c);
    assert_eq!(next_week.len(), 7);
    assert!(next_week.iter().all(|t| t.group_heading == "Custody time limit ends next week"));

    let page = paginate(&next_week, 2, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].task.id, "t08");
}

#[test]
fn same_clock_gives_identical_buckets_for_identical_deadlines() {
    let c = clock();
    let pace_at = c.now() + Duration::minutes(60);
    let case = Case::new("c1").with_defendant(Defendant::new("d1").with_pace_clock(pace_at));
    let tasks: Vec<Task> = (0..50)
        .map(|i| Task::new(format!("t{i}"), "Detention review", case.clone()))
        .collect();

    let grouped = group_tasks(tasks, SortMode::PaceClock, &c, &SeverityPolicy::default());
    assert!(
        grouped
            .iter()
            .all(|t| t.group_key == GroupKey::Pace(PaceGroup::LessThan2Hours))
    );
}

#[test]
fn every_mode_survives_an_empty_case() {
    let c = clock();
    for mode in SortMode::ALL {
        let grouped = group_tasks(
            vec![Task::new("t1", "Orphan", Case::new("c1"))],
            mode,
            &c,
            &SeverityPolicy::default(),
        );
        let g = &grouped[0];
        assert_eq!(g.severity, Severity::NotDueYet);
        if mode != SortMode::DueDate {
            assert!(g.group_key.is_sentinel(), "{mode}");
        }
        assert!(!g.group_heading.is_empty());
    }
}
