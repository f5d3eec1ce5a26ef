use axum::extract::{Path, Query, State};
use chrono::Utc;
use db::models::{session, user};
use services::quarter::QuarterService;
use services::session::SessionService;
use services::student::StudentService;
use services::summary::{QuarterOverview, QuarterReport, SummaryService};

use super::common::{ListQuartersQuery, QuarterResponse};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// GET /api/quarters?include_deleted=true
///
/// Active quarters, newest `start_date` first. Deleted quarters are included
/// only when asked for.
pub async fn list_quarters(
    State(state): State<AppState>,
    Query(query): Query<ListQuartersQuery>,
) -> ApiResult<Vec<QuarterResponse>> {
    let rows = QuarterService::list(state.db(), query.include_deleted).await?;
    ok(
        rows.into_iter().map(QuarterResponse::from).collect(),
        "Quarters retrieved successfully",
    )
}

/// GET /api/quarters/{quarter_id}
pub async fn get_quarter(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
) -> ApiResult<QuarterResponse> {
    let row = QuarterService::get(state.db(), quarter_id).await?;
    ok(row.into(), "Quarter retrieved successfully")
}

/// GET /api/quarters/{quarter_id}/sessions
pub async fn list_quarter_sessions(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
) -> ApiResult<Vec<session::Model>> {
    let rows = SessionService::list_for_quarter(state.db(), quarter_id).await?;
    ok(rows, "Sessions retrieved successfully")
}

/// GET /api/quarters/{quarter_id}/students
pub async fn list_quarter_students(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
) -> ApiResult<Vec<user::Model>> {
    let rows = StudentService::list(state.db(), Some(quarter_id)).await?;
    ok(rows, "Students retrieved successfully")
}

/// GET /api/quarters/{quarter_id}/report
///
/// Per-student attendance and contribution aggregates plus the overview
/// figures, computed at request time.
pub async fn get_report(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
) -> ApiResult<QuarterReport> {
    let report =
        SummaryService::summarize_quarter(state.db(), quarter_id, state.policy(), Utc::now())
            .await?;
    ok(report, "Quarter report computed")
}

/// GET /api/quarters/overview
pub async fn list_overviews(State(state): State<AppState>) -> ApiResult<Vec<QuarterOverview>> {
    let rows = SummaryService::list_overviews(state.db(), state.policy(), Utc::now()).await?;
    ok(rows, "Quarter overviews computed")
}
