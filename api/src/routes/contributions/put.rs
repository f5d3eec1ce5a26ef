use axum::{
    Json,
    extract::{Path, State},
};
use db::models::contribution;
use serde::Deserialize;
use services::contribution::{ContributionService, parse_quality};

use crate::response::{ApiResult, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditContributionReq {
    pub quality: String,
    pub notes: Option<String>,
}

/// PUT /api/contributions/{contribution_id}
pub async fn edit_contribution(
    State(state): State<AppState>,
    Path(contribution_id): Path<i64>,
    Json(body): Json<EditContributionReq>,
) -> ApiResult<contribution::Model> {
    let quality = parse_quality(&body.quality)?;
    let row =
        ContributionService::edit(state.db(), contribution_id, quality, body.notes.as_deref())
            .await?;
    ok(row, "Contribution updated")
}
