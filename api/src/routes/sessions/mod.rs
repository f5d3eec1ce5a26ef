use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::delete_session;
pub use get::{get_session, get_summary};
pub use post::{add_contribution, close_check_out, open_check_out, record_check_in};
pub use put::{edit_session, set_completed};

pub fn sessions_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{session_id}",
            get(get_session).put(edit_session).delete(delete_session),
        )
        .route("/{session_id}/completed", put(set_completed))
        .route("/{session_id}/summary", get(get_summary))
        .route("/{session_id}/check-ins", post(record_check_in))
        .route("/{session_id}/check-outs", post(open_check_out))
        .route("/{session_id}/check-outs/close", post(close_check_out))
        .route("/{session_id}/contributions", post(add_contribution))
}
