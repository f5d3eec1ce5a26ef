use axum::{Router, routing::put};

use crate::state::AppState;

mod delete;
mod put;

pub use delete::delete_contribution;
pub use put::{EditContributionReq, edit_contribution};

pub fn contributions_routes() -> Router<AppState> {
    Router::new().route(
        "/{contribution_id}",
        put(edit_contribution).delete(delete_contribution),
    )
}
