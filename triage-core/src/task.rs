//! Task and case records consumed by the worklist engine.
//!
//! These mirror what the route layer fetches from storage. The engine only
//! reads them; nothing here is written back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single charge against a defendant.
///
/// Upstream normally populates at most one of the two limits, but both are
/// independently optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: String,
    #[serde(default)]
    pub custody_time_limit: Option<NaiveDate>,
    #[serde(default)]
    pub statutory_time_limit: Option<NaiveDate>,
}

impl Charge {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_custody_time_limit(mut self, date: NaiveDate) -> Self {
        self.custody_time_limit = Some(date);
        self
    }

    pub fn with_statutory_time_limit(mut self, date: NaiveDate) -> Self {
        self.statutory_time_limit = Some(date);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Defendant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Detention clock expiry (UTC). Lives on the defendant, not the charge.
    #[serde(default)]
    pub pace_clock: Option<DateTime<Utc>>,
    #[serde(default)]
    pub charges: Vec<Charge>,
}

impl Defendant {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_pace_clock(mut self, at: DateTime<Utc>) -> Self {
        self.pace_clock = Some(at);
        self
    }

    pub fn with_charge(mut self, charge: Charge) -> Self {
        self.charges.push(charge);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hearing {
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    /// Owning unit/location. Carried through for display only.
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub defendants: Vec<Defendant>,
    #[serde(default)]
    pub hearings: Vec<Hearing>,
}

impl Case {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_defendant(mut self, defendant: Defendant) -> Self {
        self.defendants.push(defendant);
        self
    }

    pub fn with_hearing(mut self, start: DateTime<Utc>) -> Self {
        self.hearings.push(Hearing { start });
        self
    }
}

/// Caseworker task linked to a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,

    /// Assigned user, if any.
    #[serde(default)]
    pub owner: Option<String>,

    /// Pre-populated by task creation from whichever case deadline applied.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub escalation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    pub case: Case,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, case: Case) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: None,
            due_date: None,
            reminder_date: None,
            escalation_date: None,
            completed_at: None,
            case,
        }
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
