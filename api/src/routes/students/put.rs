use axum::{
    Json,
    extract::{Path, State},
};
use db::models::quarter_enrollment;
use services::enrollment::EnrollmentService;
use services::student::{StudentInput, StudentService};

use super::common::{EnrollmentReq, StudentResponse};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// PUT /api/students/{user_id}
pub async fn edit_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<StudentInput>,
) -> ApiResult<StudentResponse> {
    let row = StudentService::edit(state.db(), user_id, body).await?;
    ok(row.into(), "Student updated successfully")
}

/// PUT /api/students/{user_id}/enrollments
///
/// Replaces all of the student's enrollments with the given quarter.
pub async fn set_enrollment(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<EnrollmentReq>,
) -> ApiResult<quarter_enrollment::Model> {
    let row = EnrollmentService::set_enrollment(state.db(), user_id, body.quarter_id).await?;
    ok(row, "Enrollment updated")
}
