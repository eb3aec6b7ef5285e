//! HTTP handlers for the task API and the server-rendered pages.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;

use super::error::ApiErrorResponse;
use super::AppState;
use crate::task::{Task, TaskId, TaskPayload};
use crate::ui::render::{render_basic_list, render_dashboard};
use crate::ui::{today, DashboardView, EditSession, Filter, ViewQuery};

pub const LIVENESS_MESSAGE: &str = "Study Organizer API running – v2";

/// `GET /`
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store.list())
}

/// `POST /tasks`
///
/// `completed` in the body is ignored; new tasks always start open.
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskPayload>,
) -> Result<(StatusCode, Json<Task>), ApiErrorResponse> {
    let fields = payload.into_new_fields()?;
    let task = state.store.create(fields);
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks/{id}`
///
/// Full-record replacement. Any `id` in the body is ignored in favour of the
/// path.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, ApiErrorResponse> {
    let fields = payload.into_replacement_fields()?;
    let task = state.store.replace(id, fields)?;
    Ok(Json(task))
}

/// `DELETE /tasks/{id}`
///
/// Always 204; deleting an unknown id changes nothing.
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<TaskId>) -> StatusCode {
    if state.store.delete(id).is_none() {
        tracing::debug!(id = %id, "delete ignored, no such task");
    }
    StatusCode::NO_CONTENT
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub filter: Option<String>,
    pub q: Option<String>,
    pub edit: Option<String>,
}

/// `GET /app`
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let filter = query
        .filter
        .as_deref()
        .map(|raw| {
            raw.parse::<Filter>().unwrap_or_else(|err| {
                tracing::debug!(%err, "unknown dashboard filter, showing all");
                Filter::All
            })
        })
        .unwrap_or_default();
    let view_query = ViewQuery::new(filter, query.q.unwrap_or_default());

    let tasks = state.store.list();
    let mut editor = EditSession::new();
    if let Some(raw) = query.edit.as_deref() {
        match raw.parse::<TaskId>() {
            Ok(id) => {
                editor.open(&tasks, id);
            }
            Err(err) => tracing::debug!(%err, "unknown edit target, no edit session"),
        }
    }

    let view = DashboardView::build(&tasks, &view_query, today(), &state.dashboard);
    Html(render_dashboard(&view, &tasks, &editor))
}

/// `GET /app/basic`
pub async fn basic_page(State(state): State<AppState>) -> Html<String> {
    Html(render_basic_list(&state.store.list()))
}
