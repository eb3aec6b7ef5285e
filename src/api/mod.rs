//! REST surface over the task store.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::config::DashboardConfig;
use crate::store::TaskStore;

pub use error::{ApiError, ApiErrorResponse};

/// Shared handler state.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<TaskStore>,
    pub dashboard: DashboardConfig,
}

impl AppState {
    pub fn new(store: Arc<TaskStore>, dashboard: DashboardConfig) -> Self {
        Self { store, dashboard }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/app", get(handlers::dashboard_page))
        .route("/app/basic", get(handlers::basic_page))
        .with_state(state)
}
