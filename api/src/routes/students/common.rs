use chrono::{DateTime, Utc};
use db::{HasLifecycle, Lifecycle, models::user};
use serde::{Deserialize, Serialize};
use services::student::StudentInput;

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for StudentResponse {
    fn from(u: user::Model) -> Self {
        Self {
            lifecycle: u.lifecycle(),
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            student_id: u.student_id,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentReq {
    #[serde(flatten)]
    pub student: StudentInput,
    /// Enrolls the new student straight away.
    pub quarter_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListStudentsQuery {
    pub quarter_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentReq {
    pub quarter_id: i64,
}
