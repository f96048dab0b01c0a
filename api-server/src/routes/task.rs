//! Task API endpoints
//!
//! RESTful API for task CRUD operations. Every route acts on behalf of the
//! authenticated user, and routes with an `{id}` segment resolve the task
//! before the handler runs.

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskboard_core::task::{NewTask, Task, TaskFilter, TaskStatus};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Body for creating and editing a task
///
/// Fields such as `status` or `userId` are not part of the body and are
/// ignored if a client sends them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl TaskRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub status: Option<String>,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub date: Option<String>,
}

impl ListTasksQuery {
    fn into_filter(self, offset: FixedOffset) -> TaskFilter {
        TaskFilter {
            status: self.status.filter(|s| !s.is_empty()),
            date: self
                .date
                .as_deref()
                .and_then(|raw| parse_unix_seconds(raw, offset)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            date: task.date.map(|d| d.to_rfc3339()),
            status: task.status,
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

/// The task addressed by the `{id}` path segment
pub struct RouteTask(pub Task);

impl FromRequestParts<AppState> for RouteTask {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let task = state.tasks().find(id).await?;
        Ok(Self(task))
    }
}

fn parse_unix_seconds(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let seconds = raw.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.with_timezone(&offset))
}

fn ensure_owner(task: &Task, user: &AuthUser) -> Result<(), ApiError> {
    if !task.is_owned_by(user.id) {
        tracing::warn!(task_id = %task.id, user_id = %user.id, "Rejected access to task");
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }
    Ok(())
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/tasks - Create a task owned by the caller
async fn save_task(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    req.validate()?;

    let mut task = NewTask::new(user.id, req.title).with_description(req.description);
    if let Some(date) = req.date {
        task = task.with_date(date);
    }

    let created = state.tasks().save(task).await?;
    tracing::info!(task_id = %created.id, user_id = %user.id, "Created task");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

/// GET /api/tasks - List the caller's tasks, optionally filtered
async fn list_tasks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let filter = query.into_filter(state.filter_offset());
    let tasks = state.tasks().find_all(user.id, &filter).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// GET /api/tasks/:id - Get a single task
async fn find_task(user: AuthUser, RouteTask(task): RouteTask) -> Result<Json<TaskResponse>, ApiError> {
    ensure_owner(&task, &user)?;
    Ok(Json(TaskResponse::from(task)))
}

/// PUT /api/tasks/:id - Replace title, description and date
async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    RouteTask(mut task): RouteTask,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    ensure_owner(&task, &user)?;

    let Json(req) = payload.map_err(bad_body)?;
    req.validate()?;

    task.title = req.title;
    task.description = req.description;
    task.date = req.date;

    let updated = state.tasks().update(task).await?;
    Ok(Json(TaskResponse::from(updated)))
}

/// PATCH /api/tasks/:id/status - Change only the status
async fn update_task_status(
    State(state): State<AppState>,
    user: AuthUser,
    RouteTask(task): RouteTask,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    ensure_owner(&task, &user)?;

    let Json(req) = payload.map_err(bad_body)?;
    let status: TaskStatus = req.status.parse()?;

    let updated = state
        .tasks()
        .update_status(task.id, user.id, status)
        .await?;
    Ok(Json(TaskResponse::from(updated)))
}

/// DELETE /api/tasks/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    RouteTask(task): RouteTask,
) -> Result<StatusCode, ApiError> {
    ensure_owner(&task, &user)?;
    state.tasks().delete(task.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(save_task))
        .route(
            "/api/tasks/{id}",
            get(find_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/status", patch(update_task_status))
}
