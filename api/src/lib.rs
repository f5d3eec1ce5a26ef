//! HTTP/JSON surface of the attendance dashboard.

pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower_http::cors::CorsLayer;

use crate::{middleware::log_request, routes::routes, state::AppState};

/// The complete application: every route under `/api`, request logging and
/// a permissive CORS policy for the dashboard front end.
pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors)
}
