use axum::extract::{Path, State};
use services::enrollment::EnrollmentService;
use services::student::StudentService;

use super::common::StudentResponse;
use crate::response::{ApiResult, Empty, ok};
use crate::state::AppState;

/// DELETE /api/students/{user_id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<StudentResponse> {
    let row = StudentService::delete(state.db(), user_id).await?;
    ok(row.into(), "Student deleted successfully")
}

/// DELETE /api/students/{user_id}/enrollments/{quarter_id}
pub async fn unenroll(
    State(state): State<AppState>,
    Path((user_id, quarter_id)): Path<(i64, i64)>,
) -> ApiResult<Empty> {
    EnrollmentService::unenroll(state.db(), user_id, quarter_id).await?;
    ok(Empty::default(), "Student unenrolled")
}
