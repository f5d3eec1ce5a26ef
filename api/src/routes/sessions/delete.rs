use axum::extract::{Path, State};
use db::models::session;
use services::session::SessionService;

use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// DELETE /api/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<session::Model> {
    let row = SessionService::delete(state.db(), session_id).await?;
    ok(row, "Session deleted successfully")
}
