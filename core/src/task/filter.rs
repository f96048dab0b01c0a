//! List filtering for a user's tasks

use chrono::{DateTime, FixedOffset};

use super::model::Task;

/// Optional predicates applied to a user's tasks
///
/// Present predicates are combined with AND; an empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    /// Keep tasks whose status text equals this value
    pub status: Option<String>,
    /// Keep tasks due on the same calendar day, evaluated in this offset
    pub date: Option<DateTime<FixedOffset>>,
}

impl TaskFilter {
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = &self.status {
            if task.status.as_str() != status.as_str() {
                return false;
            }
        }

        if let Some(date) = &self.date {
            let Some(due) = task.date else {
                return false;
            };
            let due = due.with_timezone(&date.timezone());
            if due.date_naive() != date.date_naive() {
                return false;
            }
        }

        true
    }
}
