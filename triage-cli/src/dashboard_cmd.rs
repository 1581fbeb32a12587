use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use triage_core::{DashboardSummary, DateGroup, PaceGroup, ReferenceClock, Severity};
use triage_ingest::load_tasks;

use crate::config::Config;
use crate::list_cmd::reference_clock;

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// Task export (.json or .csv)
    #[arg(long)]
    pub file: PathBuf,

    /// Only tasks assigned to this user
    #[arg(long)]
    pub owner: Option<String>,

    /// Reference time (RFC 3339 or local "YYYY-MM-DD HH:MM"); defaults to now
    #[arg(long)]
    pub now: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

const DATE_ROWS: [DateGroup; 6] = [
    DateGroup::Overdue,
    DateGroup::Today,
    DateGroup::Tomorrow,
    DateGroup::ThisWeek,
    DateGroup::NextWeek,
    DateGroup::Later,
];

fn date_line(out: &mut String, label: &str, count: impl Fn(DateGroup) -> usize) {
    let cells: Vec<String> = DATE_ROWS
        .iter()
        .map(|g| format!("{}={}", g.tag(), count(*g)))
        .collect();
    let _ = writeln!(out, "{label:<22} {}", cells.join("  "));
}

pub fn render_text(summary: &DashboardSummary, clock: &ReferenceClock) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Dashboard (today {}, {} open tasks)\n", clock.today(), summary.total);

    let _ = writeln!(out, "## Severity");
    for s in Severity::ALL {
        let _ = writeln!(out, "{:<22} {}", s.label(), summary.severity_count(s));
    }

    let _ = writeln!(out, "\n## Time limits");
    date_line(&mut out, "Custody time limit", |g| summary.custody_count(g));
    date_line(&mut out, "Statutory time limit", |g| summary.statutory_count(g));
    date_line(&mut out, "Hearing date", |g| summary.hearing_count(g));

    let _ = writeln!(out, "\n## PACE clock");
    for g in PaceGroup::ALL.into_iter().filter(|g| !g.is_sentinel()) {
        let _ = writeln!(out, "{:<22} {}", g.tag(), summary.pace_count(g));
    }
    out
}

pub fn run(args: DashboardArgs, cfg: &Config) -> Result<()> {
    let clock = reference_clock(args.now.as_deref(), cfg)?;
    let tasks = load_tasks(&args.file, clock.timezone())?;
    let summary = DashboardSummary::build(&tasks, args.owner.as_deref(), &clock, &cfg.severity);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary).context("serialize dashboard")?);
    } else {
        print!("{}", render_text(&summary, &clock));
    }
    Ok(())
}
