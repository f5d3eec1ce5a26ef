use axum::extract::{Path, State};
use services::contribution::ContributionService;

use crate::response::{ApiResult, Empty, ok};
use crate::state::AppState;

/// DELETE /api/contributions/{contribution_id}
pub async fn delete_contribution(
    State(state): State<AppState>,
    Path(contribution_id): Path<i64>,
) -> ApiResult<Empty> {
    ContributionService::delete(state.db(), contribution_id).await?;
    ok(Empty::default(), "Contribution deleted")
}
