//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/quarters` → quarter CRUD, the quarter's sessions and students, reports
//! - `/sessions` → session edits, check-ins, checkouts, contributions, summary
//! - `/students` → student CRUD and enrollments
//! - `/contributions` → edit and delete a single contribution

use axum::Router;

use crate::routes::{
    contributions::contributions_routes, health::health_routes, quarters::quarters_routes,
    sessions::sessions_routes, students::students_routes,
};
use crate::state::AppState;

pub mod contributions;
pub mod health;
pub mod quarters;
pub mod sessions;
pub mod students;

pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/quarters", quarters_routes())
        .nest("/sessions", sessions_routes())
        .nest("/students", students_routes())
        .nest("/contributions", contributions_routes())
        .with_state(app_state)
}
