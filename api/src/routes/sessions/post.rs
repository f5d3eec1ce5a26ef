use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use db::models::{check_in, check_out, contribution};
use services::attendance::{AttendanceService, parse_check_in_status};
use services::contribution::{ContributionService, parse_quality};

use super::common::{CheckInReq, CheckOutReq, ContributionReq};
use crate::response::{ApiResult, created, ok};
use crate::state::AppState;

/// POST /api/sessions/{session_id}/check-ins
///
/// Records the student's classification for the session, replacing any
/// earlier one.
///
/// ### Request Body
/// ```json
/// { "user_id": 1, "status": "late", "observed_at": "2026-01-12T09:20:00Z" }
/// ```
///
/// ### Responses
/// - `200 OK` with the stored check-in
/// - `400 Bad Request` for an unknown status
/// - `404 Not Found` for an unknown student or session
pub async fn record_check_in(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CheckInReq>,
) -> ApiResult<check_in::Model> {
    let status = parse_check_in_status(&body.status)?;
    let observed_at = body.observed_at.unwrap_or_else(Utc::now);

    let row =
        AttendanceService::record_check_in(state.db(), body.user_id, session_id, status, observed_at)
            .await?;
    ok(row, "Check-in recorded")
}

/// POST /api/sessions/{session_id}/check-outs
///
/// ### Responses
/// - `201 Created` with the open checkout
/// - `409 Conflict` while the student already has an open checkout here
pub async fn open_check_out(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CheckOutReq>,
) -> ApiResult<check_out::Model> {
    let at = body.at.unwrap_or_else(Utc::now);
    let row = AttendanceService::open_check_out(state.db(), body.user_id, session_id, at).await?;
    created(row, "Checked out")
}

/// POST /api/sessions/{session_id}/check-outs/close
///
/// Closes the open checkout. With nothing open this succeeds with
/// `data: null` and changes nothing.
pub async fn close_check_out(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CheckOutReq>,
) -> ApiResult<Option<check_out::Model>> {
    let at = body.at.unwrap_or_else(Utc::now);
    match AttendanceService::close_check_out(state.db(), body.user_id, session_id, at).await? {
        Some(row) => ok(Some(row), "Checked back in"),
        None => ok(None, "No open checkout to close"),
    }
}

/// POST /api/sessions/{session_id}/contributions
pub async fn add_contribution(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<ContributionReq>,
) -> ApiResult<contribution::Model> {
    let quality = parse_quality(&body.quality)?;
    let row = ContributionService::add(
        state.db(),
        body.user_id,
        session_id,
        quality,
        body.notes.as_deref(),
    )
    .await?;
    created(row, "Contribution added")
}
