use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use common::QuarterResponse;
pub use delete::delete_quarter;
pub use get::{get_quarter, get_report, list_overviews, list_quarter_sessions, list_quarter_students, list_quarters};
pub use post::{create_quarter, create_session, restore_quarter};
pub use put::edit_quarter;

pub fn quarters_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quarters).post(create_quarter))
        .route("/overview", get(list_overviews))
        .route(
            "/{quarter_id}",
            get(get_quarter).put(edit_quarter).delete(delete_quarter),
        )
        .route("/{quarter_id}/restore", post(restore_quarter))
        .route(
            "/{quarter_id}/sessions",
            get(list_quarter_sessions).post(create_session),
        )
        .route("/{quarter_id}/students", get(list_quarter_students))
        .route("/{quarter_id}/report", get(get_report))
}
