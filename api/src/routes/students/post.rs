use axum::{
    Json,
    extract::{Path, State},
};
use db::models::quarter_enrollment;
use services::enrollment::EnrollmentService;
use services::student::StudentService;

use super::common::{CreateStudentReq, EnrollmentReq, StudentResponse};
use crate::response::{ApiResult, created};
use crate::state::AppState;

/// POST /api/students
///
/// ### Request Body
/// ```json
/// {
///   "full_name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "student_id": "S001",
///   "quarter_id": 1
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` for a blank name or id, or a malformed email
/// - `409 Conflict` if the email is already in use
pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<CreateStudentReq>,
) -> ApiResult<StudentResponse> {
    let row = StudentService::create(state.db(), body.student, body.quarter_id).await?;
    created(row.into(), "Student created successfully")
}

/// POST /api/students/{user_id}/enrollments
///
/// - `409 Conflict` if the student is already enrolled in the quarter
pub async fn enroll(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<EnrollmentReq>,
) -> ApiResult<quarter_enrollment::Model> {
    let row = EnrollmentService::enroll(state.db(), user_id, body.quarter_id).await?;
    created(row, "Student enrolled")
}
