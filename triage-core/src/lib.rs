//! triage-core: task severity and deadline grouping for caseworker worklists.
//!
//! Everything here is pure and synchronous. Callers build one
//! [`ReferenceClock`] per request and pass it to every classification.

pub mod dashboard;
pub mod date_range;
pub mod deadlines;
pub mod filters;
pub mod grouping;
pub mod headings;
pub mod pace;
pub mod severity;
pub mod sort_mode;
pub mod sort_order;
pub mod task;
pub mod time;
pub mod worklist;

pub use dashboard::DashboardSummary;
pub use date_range::{DateGroup, date_group, end_of_current_week, end_of_next_week};
pub use deadlines::{CaseDeadlines, TimeLimit, TimeLimitKind};
pub use filters::{WorklistFilter, parse_date_ranges, parse_pace_ranges, parse_severities};
pub use grouping::{DeadlineGroups, GroupKey, GroupedTask, group_task, group_tasks};
pub use headings::heading;
pub use pace::{PaceGroup, pace_group};
pub use severity::{Severity, SeverityPolicy, severity};
pub use sort_mode::SortMode;
pub use sort_order::UNRANKED;
pub use task::{Case, Charge, Defendant, Hearing, Task};
pub use time::{DEFAULT_TIMEZONE, ReferenceClock};
pub use worklist::{Page, Section, group_sections, paginate, sort_worklist};
