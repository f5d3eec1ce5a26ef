use chrono::Utc;
use db::models::{quarter_enrollment, user};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::attendance::require_student;
use crate::error::{ServiceError, ServiceResult};
use crate::quarter::require_quarter;
use crate::validate::non_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudentInput {
    #[validate(custom(function = "non_blank", message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    #[validate(custom(function = "non_blank", message = "Student ID is required"))]
    pub student_id: String,
}

pub struct StudentService;

impl StudentService {
    /// Creates a student, enrolling them in `quarter_id` in the same
    /// transaction when one is given.
    pub async fn create(
        db: &DatabaseConnection,
        input: StudentInput,
        quarter_id: Option<i64>,
    ) -> ServiceResult<user::Model> {
        input.validate()?;
        let email = input.email.trim().to_lowercase();

        if let Some(quarter_id) = quarter_id {
            require_quarter(db, quarter_id).await?;
        }
        if user::Model::email_taken(db, &email, None).await? {
            warn!(%email, "duplicate email rejected");
            return Err(ServiceError::Conflict(format!("Email {email} is already in use")));
        }

        let txn = db.begin().await?;
        let row = user::Model::create(&txn, input.full_name.trim(), &email, input.student_id.trim())
            .await?;
        if let Some(quarter_id) = quarter_id {
            quarter_enrollment::Model::create(&txn, row.id, quarter_id).await?;
        }
        txn.commit().await?;

        info!(user_id = row.id, ?quarter_id, "student created");
        Ok(row)
    }

    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        input: StudentInput,
    ) -> ServiceResult<user::Model> {
        input.validate()?;
        let email = input.email.trim().to_lowercase();

        if user::Model::email_taken(db, &email, Some(id)).await? {
            return Err(ServiceError::Conflict(format!("Email {email} is already in use")));
        }

        let row =
            user::Model::edit(db, id, input.full_name.trim(), &email, input.student_id.trim())
                .await?;
        info!(user_id = id, "student edited");
        Ok(row)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<user::Model> {
        require_student(db, id).await
    }

    /// All active students, or only those enrolled in `quarter_id`.
    pub async fn list(
        db: &DatabaseConnection,
        quarter_id: Option<i64>,
    ) -> ServiceResult<Vec<user::Model>> {
        let rows = match quarter_id {
            Some(quarter_id) => {
                require_quarter(db, quarter_id).await?;
                user::Model::list_enrolled(db, quarter_id).await?
            }
            None => user::Model::list_active(db).await?,
        };
        Ok(rows)
    }

    /// Soft-deletes the student. Their recorded events stay in place.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<user::Model> {
        let row = user::Model::soft_delete(db, id, Utc::now()).await?;
        info!(user_id = id, "student deleted");
        Ok(row)
    }
}
