use axum::extract::{Path, State};
use services::quarter::QuarterService;

use super::common::QuarterResponse;
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// DELETE /api/quarters/{quarter_id}
///
/// Soft delete. The quarter's sessions and recorded events are kept and the
/// quarter can be restored.
pub async fn delete_quarter(
    State(state): State<AppState>,
    Path(quarter_id): Path<i64>,
) -> ApiResult<QuarterResponse> {
    let row = QuarterService::delete(state.db(), quarter_id).await?;
    ok(row.into(), "Quarter deleted successfully")
}
