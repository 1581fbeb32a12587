//! triage-ingest: load task exports (JSON or CSV) into typed worklist records.
//!
//! Date validation happens here so the engine only ever sees well-formed values.

pub mod csv_export;
pub mod dates;
pub mod records;

pub use csv_export::{parse_tasks_csv, parse_tasks_csv_reader};
pub use records::{RawCase, RawCharge, RawDefendant, RawHearing, RawTask, parse_tasks_json};

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use std::path::Path;
use triage_core::Task;

/// Load tasks from a `.json` or `.csv` export.
pub fn load_tasks(path: impl AsRef<Path>, tz: Tz) -> Result<Vec<Task>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let tasks = match ext.as_deref() {
        Some("json") => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            parse_tasks_json(&s, tz).with_context(|| format!("parsing {}", path.display()))?
        }
        Some("csv") => {
            parse_tasks_csv(path, tz).with_context(|| format!("parsing {}", path.display()))?
        }
        _ => bail!(
            "unsupported export format: {} (expected .json or .csv)",
            path.display()
        ),
    };

    tracing::debug!(path = %path.display(), tasks = tasks.len(), "loaded task export");
    Ok(tasks)
}
