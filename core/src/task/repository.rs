//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{NewTask, Task, TaskStatus};
use crate::{Error, Result};

/// Repository interface for task CRUD operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task, assigning its identifier
    async fn save(&self, task: NewTask) -> Result<Task>;

    /// Get a task by ID, failing with `TaskNotFound` when absent
    async fn find(&self, id: Uuid) -> Result<Task>;

    /// Get all tasks owned by a user
    async fn find_all_tasks(&self, user_id: Uuid) -> Result<Vec<Task>>;

    /// Update an existing task
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task by ID
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Set the status of a task owned by `user_id`
    ///
    /// The default implementation reads and then writes, so two concurrent
    /// calls on the same task can interleave. Stores that can check and write
    /// under one lock or transaction should override it.
    async fn update_status(&self, id: Uuid, user_id: Uuid, status: TaskStatus) -> Result<Task> {
        let mut task = self.find(id).await?;
        if !task.is_owned_by(user_id) {
            return Err(Error::AccessDenied {
                task_id: id,
                user_id,
            });
        }
        task.status = status;
        self.update(task).await
    }
}
