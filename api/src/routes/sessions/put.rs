use axum::{
    Json,
    extract::{Path, State},
};
use db::models::session;
use services::session::{SessionInput, SessionService};

use super::common::CompletedReq;
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// PUT /api/sessions/{session_id}
pub async fn edit_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<SessionInput>,
) -> ApiResult<session::Model> {
    let row = SessionService::edit(state.db(), session_id, body).await?;
    ok(row, "Session updated successfully")
}

/// PUT /api/sessions/{session_id}/completed
///
/// `{ "completed": true }` marks the session done, `false` reopens it.
pub async fn set_completed(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CompletedReq>,
) -> ApiResult<session::Model> {
    let row = SessionService::set_completed(state.db(), session_id, body.completed).await?;
    let message = if row.is_completed {
        "Session marked completed"
    } else {
        "Session reopened"
    };
    ok(row, message)
}
