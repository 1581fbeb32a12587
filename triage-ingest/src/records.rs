//! JSON task export records, with dates still as strings.
//!
//! Converted into `triage_core` records by [`RawTask::into_task`], which is
//! where malformed dates are caught.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use triage_core::{Case, Charge, Defendant, Hearing, Task};

use crate::dates::{optional_date, optional_instant, parse_instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCharge {
    pub id: String,
    #[serde(default)]
    pub custody_time_limit: Option<String>,
    #[serde(default)]
    pub statutory_time_limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawDefendant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pace_clock: Option<String>,
    #[serde(default)]
    pub charges: Vec<RawCharge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHearing {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCase {
    pub id: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub defendants: Vec<RawDefendant>,
    #[serde(default)]
    pub hearings: Vec<RawHearing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub reminder_date: Option<String>,
    #[serde(default)]
    pub escalation_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    pub case: RawCase,
}

impl RawCharge {
    fn into_charge(self) -> Result<Charge> {
        Ok(Charge {
            custody_time_limit: optional_date(self.custody_time_limit.as_deref(), "custodyTimeLimit")?,
            statutory_time_limit: optional_date(
                self.statutory_time_limit.as_deref(),
                "statutoryTimeLimit",
            )?,
            id: self.id,
        })
    }
}

impl RawDefendant {
    fn into_defendant(self, tz: Tz) -> Result<Defendant> {
        let pace_clock = optional_instant(self.pace_clock.as_deref(), tz, "paceClock")?;
        let charges = self
            .charges
            .into_iter()
            .map(|c| {
                let id = c.id.clone();
                c.into_charge().with_context(|| format!("charge {id}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Defendant {
            id: self.id,
            name: self.name,
            pace_clock,
            charges,
        })
    }
}

impl RawCase {
    fn into_case(self, tz: Tz) -> Result<Case> {
        let defendants = self
            .defendants
            .into_iter()
            .map(|d| {
                let id = d.id.clone();
                d.into_defendant(tz).with_context(|| format!("defendant {id}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let hearings = self
            .hearings
            .iter()
            .map(|h| {
                parse_instant(&h.start, tz)
                    .map(|start| Hearing { start })
                    .context("field hearings.start")
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Case {
            id: self.id,
            unit: self.unit,
            defendants,
            hearings,
        })
    }
}

impl RawTask {
    pub fn into_task(self, tz: Tz) -> Result<Task> {
        let id = self.id.clone();
        self.convert(tz).with_context(|| format!("task {id}"))
    }

    fn convert(self, tz: Tz) -> Result<Task> {
        let case_id = self.case.id.clone();
        Ok(Task {
            due_date: optional_instant(self.due_date.as_deref(), tz, "dueDate")?,
            reminder_date: optional_instant(self.reminder_date.as_deref(), tz, "reminderDate")?,
            escalation_date: optional_instant(self.escalation_date.as_deref(), tz, "escalationDate")?,
            completed_at: optional_instant(self.completed_at.as_deref(), tz, "completedAt")?,
            case: self
                .case
                .into_case(tz)
                .with_context(|| format!("case {case_id}"))?,
            id: self.id,
            name: self.name,
            owner: self.owner,
        })
    }
}

/// Parse a JSON array of task records.
pub fn parse_tasks_json(json: &str, tz: Tz) -> Result<Vec<Task>> {
    let raw: Vec<RawTask> = serde_json::from_str(json).context("parse task JSON")?;
    raw.into_iter().map(|t| t.into_task(tz)).collect()
}
