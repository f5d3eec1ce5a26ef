use axum::{
    Json,
    extract::{Path, State},
};
use services::quarter::{QuarterInput, QuarterService};

use super::common::QuarterResponse;
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// PUT /api/quarters/{quarter_id}
pub async fn edit_quarter(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
    Json(body): Json<QuarterInput>,
) -> ApiResult<QuarterResponse> {
    let row = QuarterService::edit(state.db(), quarter_id, body).await?;
    ok(row.into(), "Quarter updated successfully")
}
