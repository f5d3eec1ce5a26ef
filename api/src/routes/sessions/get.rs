use axum::extract::{Path, State};
use chrono::Utc;
use db::models::session;
use services::session::SessionService;
use services::summary::{SessionReport, SummaryService};

use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// GET /api/sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<session::Model> {
    let row = SessionService::get(state.db(), session_id).await?;
    ok(row, "Session retrieved successfully")
}

/// GET /api/sessions/{session_id}/summary
///
/// One row per student enrolled in the session's quarter. Open checkouts
/// are measured up to the time of the request.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "session": { "session_id": 3, "session_number": 2, "quarter_name": "Winter 2026", ... },
///     "students": [
///       {
///         "user_id": 1,
///         "full_name": "Ada Lovelace",
///         "check_in_status": "late",
///         "minutes_late": 20,
///         "total_checkout_minutes": 10,
///         "total_absence_minutes": 30,
///         "time_remaining": 15,
///         "status": "warning",
///         "contribution_count": 0,
///         "average_contribution_quality": null,
///         "is_currently_checked_out": false,
///         "current_checkout_time": null
///       }
///     ]
///   },
///   "message": "Session summary computed"
/// }
/// ```
pub async fn get_summary(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<SessionReport> {
    let report =
        SummaryService::summarize_session(state.db(), session_id, state.policy(), Utc::now())
            .await?;
    ok(report, "Session summary computed")
}
