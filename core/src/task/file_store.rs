//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{NewTask, Task, TaskStatus};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of tasks
    cache: RwLock<HashMap<Uuid, Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks.into_iter().map(|t| (t.id, t)).collect()
        } else {
            HashMap::new()
        };

        tracing::debug!("Loaded {} tasks from {:?}", cache.len(), path);

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Persist the given snapshot to disk
    async fn persist(&self, cache: &HashMap<Uuid, Task>) -> Result<()> {
        let mut tasks: Vec<&Task> = cache.values().collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let content = serde_json::to_string_pretty(&tasks)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn save(&self, task: NewTask) -> Result<Task> {
        let mut cache = self.cache.write().await;
        let mut id = Uuid::new_v4();
        while cache.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let task = task.into_task(id, Utc::now());
        cache.insert(task.id, task.clone());
        if let Err(e) = self.persist(&cache).await {
            cache.remove(&task.id);
            return Err(e);
        }
        Ok(task)
    }

    async fn find(&self, id: Uuid) -> Result<Task> {
        let cache = self.cache.read().await;
        cache.get(&id).cloned().ok_or(Error::TaskNotFound(id))
    }

    async fn find_all_tasks(&self, user_id: Uuid) -> Result<Vec<Task>> {
        let cache = self.cache.read().await;
        let mut tasks: Vec<Task> = cache
            .values()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect();
        // Newest first
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update(&self, mut task: Task) -> Result<Task> {
        let mut cache = self.cache.write().await;
        let previous = cache
            .get(&task.id)
            .cloned()
            .ok_or(Error::TaskNotFound(task.id))?;
        // Owner and creation time are fixed once stored
        task.user_id = previous.user_id;
        task.created_at = previous.created_at;
        task.updated_at = Utc::now();
        cache.insert(task.id, task.clone());
        if let Err(e) = self.persist(&cache).await {
            cache.insert(previous.id, previous);
            return Err(e);
        }
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut cache = self.cache.write().await;
        let removed = cache.remove(&id).ok_or(Error::TaskNotFound(id))?;
        if let Err(e) = self.persist(&cache).await {
            cache.insert(id, removed);
            return Err(e);
        }
        Ok(())
    }

    async fn update_status(&self, id: Uuid, user_id: Uuid, status: TaskStatus) -> Result<Task> {
        let mut cache = self.cache.write().await;
        let previous = cache.get(&id).cloned().ok_or(Error::TaskNotFound(id))?;
        if !previous.is_owned_by(user_id) {
            return Err(Error::AccessDenied {
                task_id: id,
                user_id,
            });
        }

        let mut task = previous.clone();
        task.status = status;
        task.updated_at = Utc::now();
        cache.insert(id, task.clone());
        if let Err(e) = self.persist(&cache).await {
            cache.insert(id, previous);
            return Err(e);
        }
        Ok(task)
    }
}
