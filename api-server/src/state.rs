//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::FixedOffset;
use taskboard_core::task::{FileTaskStore, TaskService};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    data_dir: PathBuf,
    tasks: TaskService<FileTaskStore>,
    jwt_secret: String,
    filter_offset: FixedOffset,
}

impl AppState {
    /// Create a new AppState from the server configuration
    pub async fn new(config: &ServerConfig) -> taskboard_core::Result<Self> {
        let tasks_path = config.data_dir.join("tasks.json");
        let task_store = FileTaskStore::new(tasks_path).await?;

        Ok(Self::with_store(
            config.data_dir.clone(),
            Arc::new(task_store),
            config.jwt_secret.clone(),
            config.filter_offset,
        ))
    }

    pub fn with_store(
        data_dir: PathBuf,
        task_store: Arc<FileTaskStore>,
        jwt_secret: String,
        filter_offset: FixedOffset,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                data_dir,
                tasks: TaskService::new(task_store),
                jwt_secret,
                filter_offset,
            }),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// Get reference to the task service
    pub fn tasks(&self) -> &TaskService<FileTaskStore> {
        &self.inner.tasks
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner.jwt_secret
    }

    pub fn filter_offset(&self) -> FixedOffset {
        self.inner.filter_offset
    }
}
