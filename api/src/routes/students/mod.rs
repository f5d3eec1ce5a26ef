use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use common::StudentResponse;
pub use delete::{delete_student, unenroll};
pub use get::{get_student, list_enrollments, list_students};
pub use post::{create_student, enroll};
pub use put::{edit_student, set_enrollment};

pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/{user_id}",
            get(get_student).put(edit_student).delete(delete_student),
        )
        .route(
            "/{user_id}/enrollments",
            get(list_enrollments).post(enroll).put(set_enrollment),
        )
        .route("/{user_id}/enrollments/{quarter_id}", delete(unenroll))
}
