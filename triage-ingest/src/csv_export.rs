//! Flat CSV task exports: one row per charge, folded back into tasks.
//!
//! Header:
//! task_id,task_name,owner,due_date,completed_at,case_id,defendant_id,
//! pace_clock,charge_id,custody_time_limit,statutory_time_limit,hearing_start

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::records::{RawCase, RawCharge, RawDefendant, RawHearing, RawTask};

#[derive(Debug, Clone, Deserialize)]
struct CsvRow {
    task_id: String,
    task_name: String,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
    case_id: String,
    #[serde(default)]
    defendant_id: Option<String>,
    #[serde(default)]
    pace_clock: Option<String>,
    #[serde(default)]
    charge_id: Option<String>,
    #[serde(default)]
    custody_time_limit: Option<String>,
    #[serde(default)]
    statutory_time_limit: Option<String>,
    #[serde(default)]
    hearing_start: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn fold_row(task: &mut RawTask, row: CsvRow) -> Result<()> {
    if task.case.id != row.case_id {
        bail!(
            "task {} appears with two cases ({} and {})",
            task.id,
            task.case.id,
            row.case_id
        );
    }

    for (field, seen, value) in [
        ("due_date", &task.due_date, non_blank(row.due_date)),
        ("completed_at", &task.completed_at, non_blank(row.completed_at)),
    ] {
        if *seen != value {
            bail!(
                "task {} has conflicting {field} ({} and {})",
                task.id,
                seen.as_deref().unwrap_or("blank"),
                value.as_deref().unwrap_or("blank")
            );
        }
    }

    if let Some(start) = non_blank(row.hearing_start) {
        if !task.case.hearings.iter().any(|h| h.start == start) {
            task.case.hearings.push(RawHearing { start });
        }
    }

    let Some(defendant_id) = non_blank(row.defendant_id) else {
        return Ok(());
    };

    let idx = match task.case.defendants.iter().position(|d| d.id == defendant_id) {
        Some(i) => i,
        None => {
            task.case.defendants.push(RawDefendant {
                id: defendant_id,
                ..RawDefendant::default()
            });
            task.case.defendants.len() - 1
        }
    };
    let defendant = &mut task.case.defendants[idx];

    if defendant.pace_clock.is_none() {
        defendant.pace_clock = non_blank(row.pace_clock);
    }

    if let Some(charge_id) = non_blank(row.charge_id) {
        if !defendant.charges.iter().any(|c| c.id == charge_id) {
            defendant.charges.push(RawCharge {
                id: charge_id,
                custody_time_limit: non_blank(row.custody_time_limit),
                statutory_time_limit: non_blank(row.statutory_time_limit),
            });
        }
    }

    Ok(())
}

/// Fold rows into raw tasks, preserving first-seen task order.
fn fold_rows(rows: impl IntoIterator<Item = Result<CsvRow>>) -> Result<Vec<RawTask>> {
    let mut out: Vec<RawTask> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (line, row) in rows.into_iter().enumerate() {
        // +2: header row, 1-based lines.
        let row = row.with_context(|| format!("CSV row {}", line + 2))?;
        let slot = match index.get(&row.task_id) {
            Some(&i) => i,
            None => {
                out.push(RawTask {
                    id: row.task_id.clone(),
                    name: row.task_name.clone(),
                    owner: non_blank(row.owner.clone()),
                    due_date: non_blank(row.due_date.clone()),
                    reminder_date: None,
                    escalation_date: None,
                    completed_at: non_blank(row.completed_at.clone()),
                    case: RawCase {
                        id: row.case_id.clone(),
                        ..RawCase::default()
                    },
                });
                index.insert(row.task_id.clone(), out.len() - 1);
                out.len() - 1
            }
        };
        fold_row(&mut out[slot], row).with_context(|| format!("CSV row {}", line + 2))?;
    }

    Ok(out)
}

pub fn parse_tasks_csv_reader(reader: impl Read, tz: Tz) -> Result<Vec<triage_core::Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = rdr
        .deserialize::<CsvRow>()
        .map(|r| r.map_err(anyhow::Error::from));
    let raw = fold_rows(rows)?;

    raw.into_iter().map(|t| t.into_task(tz)).collect()
}

pub fn parse_tasks_csv(path: impl AsRef<Path>, tz: Tz) -> Result<Vec<triage_core::Task>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_tasks_csv_reader(file, tz)
}
