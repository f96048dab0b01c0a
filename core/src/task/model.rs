//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    New,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::New
    }
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported task status '{}'",
                value
            ))),
        }
    }
}

/// A task owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Due date
    pub date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// A task that has not been stored yet
///
/// The repository assigns the identifier and timestamps on save. The status
/// always starts as [`TaskStatus::New`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    user_id: Uuid,
    title: String,
    description: String,
    date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Create a draft owned by `user_id`
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: String::new(),
            date: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the due date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Turn the draft into a stored task with the given id
    pub fn into_task(self, id: Uuid, now: DateTime<Utc>) -> Task {
        Task {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            date: self.date,
            status: TaskStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_task_starts_as_new() {
        let user_id = Uuid::new_v4();
        let id = Uuid::new_v4();
        let task = NewTask::new(user_id, "Write report")
            .with_description("Quarterly numbers")
            .into_task(id, Utc::now());

        assert_eq!(task.id, id);
        assert_eq!(task.user_id, user_id);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description, "Quarterly numbers");
        assert_eq!(task.status, TaskStatus::New);
        assert!(task.date.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_new_task_with_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let task = NewTask::new(Uuid::new_v4(), "Dentist")
            .with_date(date)
            .into_task(Uuid::new_v4(), Utc::now());
        assert_eq!(task.date, Some(date));
    }

    #[test]
    fn test_status_text_round_trip() {
        for status in [TaskStatus::New, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }
    }

    #[test]
    fn test_status_parse_is_lenient_about_case() {
        assert_eq!(" DONE ".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        match "archived".parse::<TaskStatus>() {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("archived")),
            other => panic!("Expected InvalidInput error, got: {:?}", other),
        }
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let task = NewTask::new(owner, "Mine").into_task(Uuid::new_v4(), Utc::now());
        assert!(task.is_owned_by(owner));
        assert!(!task.is_owned_by(Uuid::new_v4()));
    }
}
