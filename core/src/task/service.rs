//! Task service
//!
//! Orchestrates repository calls for the HTTP layer. Every repository failure
//! is logged here once, tagged with the operation, and returned unchanged.

use std::sync::Arc;

use tracing::{error, warn};
use uuid::Uuid;

use super::filter::TaskFilter;
use super::model::{NewTask, Task, TaskStatus};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// Service layer over a [`TaskRepository`]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Store a new task
    pub async fn save(&self, task: NewTask) -> Result<Task> {
        let user_id = task.user_id();
        self.repository.save(task).await.map_err(|e| {
            error!(%user_id, "TaskService::save failed: {}", e);
            e
        })
    }

    /// Get a task by ID
    pub async fn find(&self, id: Uuid) -> Result<Task> {
        self.repository.find(id).await.map_err(|e| {
            log_failure("TaskService::find", id, &e);
            e
        })
    }

    /// List a user's tasks that match `filter`
    pub async fn find_all(&self, user_id: Uuid, filter: &TaskFilter) -> Result<Vec<Task>> {
        let tasks = self.repository.find_all_tasks(user_id).await.map_err(|e| {
            error!(%user_id, "TaskService::find_all failed: {}", e);
            e
        })?;

        Ok(tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Persist changes to an existing task
    pub async fn update(&self, task: Task) -> Result<Task> {
        let id = task.id;
        self.repository.update(task).await.map_err(|e| {
            log_failure("TaskService::update", id, &e);
            e
        })
    }

    /// Change only the status of a task owned by `user_id`
    pub async fn update_status(
        &self,
        task_id: Uuid,
        user_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task> {
        self.repository
            .update_status(task_id, user_id, status)
            .await
            .map_err(|e| {
                log_failure("TaskService::update_status", task_id, &e);
                e
            })
    }

    /// Delete a task by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repository.delete(id).await.map_err(|e| {
            log_failure("TaskService::delete", id, &e);
            e
        })
    }
}

fn log_failure(operation: &str, task_id: Uuid, err: &Error) {
    match err {
        Error::TaskNotFound(_) | Error::AccessDenied { .. } => {
            warn!(%task_id, "{} rejected: {}", operation, err)
        }
        _ => error!(%task_id, "{} failed: {}", operation, err),
    }
}
