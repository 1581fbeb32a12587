use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use triage_core::{
    GroupedTask, Page, ReferenceClock, SortMode, WorklistFilter, group_sections, group_tasks,
    paginate, parse_date_ranges, parse_pace_ranges, parse_severities, sort_worklist,
};
use triage_ingest::dates::parse_instant;
use triage_ingest::load_tasks;

use crate::config::Config;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Task export (.json or .csv)
    #[arg(long)]
    pub file: PathBuf,

    /// Sort mode, e.g. "Custody time limit". Unknown values sort by due date.
    #[arg(long)]
    pub sort: Option<String>,

    /// Reference time (RFC 3339 or local "YYYY-MM-DD HH:MM"); defaults to now
    #[arg(long)]
    pub now: Option<String>,

    /// Severity labels to keep ("Overdue", "Due soon", ...)
    #[arg(long, value_delimiter = ',')]
    pub severity: Vec<String>,

    /// Custody time limit ranges (overdue, today, tomorrow, thisWeek, nextWeek, later)
    #[arg(long, value_delimiter = ',')]
    pub ctl: Vec<String>,

    /// Statutory time limit ranges
    #[arg(long, value_delimiter = ',')]
    pub stl: Vec<String>,

    /// Earliest-time-limit ranges
    #[arg(long = "time-limit", value_delimiter = ',')]
    pub time_limit: Vec<String>,

    /// Hearing date ranges
    #[arg(long, value_delimiter = ',')]
    pub hearing: Vec<String>,

    /// PACE clock ranges (expired, lessThan1Hour, lessThan2Hours, lessThan3Hours, moreThan3Hours)
    #[arg(long, value_delimiter = ',')]
    pub pace: Vec<String>,

    /// Only tasks assigned to this user
    #[arg(long)]
    pub owner: Option<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Emit JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl ListArgs {
    pub fn filter(&self) -> WorklistFilter {
        fn strs(v: &[String]) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }
        WorklistFilter {
            severities: parse_severities(strs(&self.severity)),
            custody_time_limit: parse_date_ranges(strs(&self.ctl)),
            statutory_time_limit: parse_date_ranges(strs(&self.stl)),
            time_limit: parse_date_ranges(strs(&self.time_limit)),
            hearing_date: parse_date_ranges(strs(&self.hearing)),
            pace_clock: parse_pace_ranges(strs(&self.pace)),
            owner: self.owner.clone(),
        }
    }

    pub fn sort_mode(&self, cfg: &Config) -> SortMode {
        match self.sort.as_deref() {
            Some(s) => SortMode::resolve(Some(s)),
            None => cfg.list.default_sort,
        }
    }
}

/// Build the reference clock exactly once for this invocation.
pub fn reference_clock(now: Option<&str>, cfg: &Config) -> Result<ReferenceClock> {
    let tz = cfg.timezone()?;
    match now {
        Some(s) => {
            let at = parse_instant(s, tz).with_context(|| format!("--now {s}"))?;
            Ok(ReferenceClock::at(at, tz))
        }
        None => Ok(ReferenceClock::system(tz)),
    }
}

/// Group, filter and sort incomplete tasks for display.
pub fn build_worklist(
    args: &ListArgs,
    cfg: &Config,
    clock: &ReferenceClock,
) -> Result<(SortMode, Vec<GroupedTask>)> {
    let tasks = load_tasks(&args.file, clock.timezone())?;
    let mode = args.sort_mode(cfg);

    let open = tasks.into_iter().filter(|t| !t.is_completed());
    let grouped = group_tasks(open, mode, clock, &cfg.severity);
    let mut kept = args.filter().apply(grouped, clock);
    sort_worklist(&mut kept);
    Ok((mode, kept))
}

pub fn render_text(mode: SortMode, clock: &ReferenceClock, page: &Page<'_, GroupedTask>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Worklist by {} (today {}, {})\n",
        mode,
        clock.today(),
        clock.timezone()
    );

    if page.items.is_empty() {
        let _ = writeln!(out, "(no tasks)");
    }

    for section in group_sections(page.items) {
        let _ = writeln!(out, "## {} ({})", section.heading, section.tasks.len());
        for t in section.tasks {
            let due = t
                .task
                .due_date
                .map(|d| clock.local_date(d).to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "- [{}] {} | {} | case {} | due {}",
                t.severity, t.task.id, t.task.name, t.task.case.id, due
            );
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Page {} of {} ({} tasks)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    );
    out
}

pub fn run(args: ListArgs, cfg: &Config) -> Result<()> {
    let clock = reference_clock(args.now.as_deref(), cfg)?;
    let (mode, worklist) = build_worklist(&args, cfg, &clock)?;
    let page = paginate(&worklist, args.page, cfg.list.page_size);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page).context("serialize worklist")?);
    } else {
        print!("{}", render_text(mode, &clock, &page));
    }
    Ok(())
}
