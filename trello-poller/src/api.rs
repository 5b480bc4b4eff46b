//! Trigger status HTTP API.
//!
//! Exposes two routes:
//! - `GET /api/triggers` - status of every running trigger
//! - `GET /api/triggers/:trigger_id` - status of a single trigger

use crate::manager::StatusMap;
use crate::scheduler::TriggerStatus;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

/// Shared state for the status API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub status_map: StatusMap,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ---------------------------------------------------------------------------
// Business logic (called from HTTP handlers and unit tests)
// ---------------------------------------------------------------------------

/// Snapshot of every trigger status, ordered by trigger id.
pub async fn collect_statuses(status_map: &StatusMap) -> Vec<TriggerStatus> {
    let entries: Vec<_> = status_map.lock().await.values().cloned().collect();

    let mut statuses = Vec::with_capacity(entries.len());
    for entry in entries {
        statuses.push(entry.lock().await.clone());
    }
    statuses.sort_by(|a, b| a.trigger_id.cmp(&b.trigger_id));
    statuses
}

pub async fn find_status(status_map: &StatusMap, trigger_id: &str) -> Option<TriggerStatus> {
    let entry = status_map.lock().await.get(trigger_id).cloned()?;
    let status = entry.lock().await.clone();
    Some(status)
}

// ---------------------------------------------------------------------------
// HTTP handlers
// ---------------------------------------------------------------------------

async fn list_triggers(State(state): State<ApiState>) -> Json<Vec<TriggerStatus>> {
    Json(collect_statuses(&state.status_map).await)
}

async fn get_trigger(
    State(state): State<ApiState>,
    Path(trigger_id): Path<String>,
) -> Result<Json<TriggerStatus>, AppError> {
    find_status(&state.status_map, &trigger_id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound(trigger_id))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

enum AppError {
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::NotFound(trigger_id) = self;
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("trigger '{}' not found", trigger_id),
            }),
        )
            .into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/triggers", get(list_triggers))
        .route("/api/triggers/:trigger_id", get(get_trigger))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
