use axum::{
    Json,
    extract::{Path, State},
};
use db::models::session;
use services::quarter::{QuarterInput, QuarterService};
use services::session::{SessionInput, SessionService};

use super::common::QuarterResponse;
use crate::response::{ApiResult, created, ok};
use crate::state::AppState;

/// POST /api/quarters
///
/// ### Request Body
/// ```json
/// { "name": "Winter 2026", "start_date": "2026-01-05", "end_date": "2026-03-20" }
/// ```
///
/// ### Responses
/// - `201 Created` with the new quarter
/// - `400 Bad Request` on a blank name or an end date before the start date
pub async fn create_quarter(
    State(state): State<AppState>,
    Json(body): Json<QuarterInput>,
) -> ApiResult<QuarterResponse> {
    let row = QuarterService::create(state.db(), body).await?;
    created(row.into(), "Quarter created successfully")
}

/// POST /api/quarters/{quarter_id}/restore
pub async fn restore_quarter(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
) -> ApiResult<QuarterResponse> {
    let row = QuarterService::restore(state.db(), quarter_id).await?;
    ok(row.into(), "Quarter restored successfully")
}

/// POST /api/quarters/{quarter_id}/sessions
///
/// ### Responses
/// - `201 Created`
/// - `404 Not Found` if the quarter does not exist
/// - `409 Conflict` if the session number is already used in the quarter
pub async fn create_session(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
    Json(body): Json<SessionInput>,
) -> ApiResult<session::Model> {
    let row = SessionService::create(state.db(), quarter_id, body).await?;
    created(row, "Session created successfully")
}
