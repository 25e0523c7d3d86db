//! Session Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use session_registry::SessionSummary;

/// Response for the sessions listing
#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub data: Vec<SessionSummary>,
    pub count: usize,
}

/// List live sessions
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<SessionsResponse> {
    let data = state.registry.summaries().await;
    Json(SessionsResponse {
        count: data.len(),
        data,
    })
}

/// Drop a subject's session; its timer re-accumulates from scratch on the
/// next frame
pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<String>,
) -> impl IntoResponse {
    if state.registry.remove(&subject_id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
