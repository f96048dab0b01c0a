//! Route handlers

pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(task::router())
}
