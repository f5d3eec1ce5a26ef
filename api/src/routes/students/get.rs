use axum::extract::{Path, Query, State};
use services::enrollment::EnrollmentService;
use services::student::StudentService;

use super::common::{ListStudentsQuery, StudentResponse};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// GET /api/students?quarter_id=1
///
/// Active students ordered by name, optionally narrowed to one quarter's
/// enrollment.
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<ListStudentsQuery>,
) -> ApiResult<Vec<StudentResponse>> {
    let rows = StudentService::list(state.db(), query.quarter_id).await?;
    ok(
        rows.into_iter().map(StudentResponse::from).collect(),
        "Students retrieved successfully",
    )
}

/// GET /api/students/{user_id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<StudentResponse> {
    let row = StudentService::get(state.db(), user_id).await?;
    ok(row.into(), "Student retrieved successfully")
}

/// GET /api/students/{user_id}/enrollments
///
/// Ids of the quarters the student is enrolled in.
pub async fn list_enrollments(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Vec<i64>> {
    let ids = EnrollmentService::quarters_for(state.db(), user_id).await?;
    ok(ids, "Enrollments retrieved successfully")
}
