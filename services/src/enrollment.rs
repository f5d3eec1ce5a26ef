use db::models::quarter_enrollment;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

use crate::attendance::require_student;
use crate::error::{ServiceError, ServiceResult};
use crate::quarter::require_quarter;

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn enroll(
        db: &DatabaseConnection,
        user_id: i64,
        quarter_id: i64,
    ) -> ServiceResult<quarter_enrollment::Model> {
        require_student(db, user_id).await?;
        require_quarter(db, quarter_id).await?;

        if quarter_enrollment::Model::find(db, user_id, quarter_id).await?.is_some() {
            warn!(user_id, quarter_id, "duplicate enrollment rejected");
            return Err(ServiceError::Conflict(format!(
                "Student {user_id} is already enrolled in quarter {quarter_id}"
            )));
        }

        let row = quarter_enrollment::Model::create(db, user_id, quarter_id).await?;
        info!(user_id, quarter_id, "student enrolled");
        Ok(row)
    }

    pub async fn unenroll(db: &DatabaseConnection, user_id: i64, quarter_id: i64) -> ServiceResult<()> {
        if !quarter_enrollment::Model::remove(db, user_id, quarter_id).await? {
            return Err(ServiceError::NotFound(format!(
                "Student {user_id} is not enrolled in quarter {quarter_id}"
            )));
        }
        info!(user_id, quarter_id, "student unenrolled");
        Ok(())
    }

    /// Replaces every enrollment of the student with the single given one.
    pub async fn set_enrollment(
        db: &DatabaseConnection,
        user_id: i64,
        quarter_id: i64,
    ) -> ServiceResult<quarter_enrollment::Model> {
        require_student(db, user_id).await?;
        require_quarter(db, quarter_id).await?;

        let txn = db.begin().await?;
        let removed = quarter_enrollment::Model::remove_all_for_user(&txn, user_id).await?;
        let row = quarter_enrollment::Model::create(&txn, user_id, quarter_id).await?;
        txn.commit().await?;

        info!(user_id, quarter_id, removed, "enrollment replaced");
        Ok(row)
    }

    pub async fn quarters_for(db: &DatabaseConnection, user_id: i64) -> ServiceResult<Vec<i64>> {
        require_student(db, user_id).await?;
        Ok(quarter_enrollment::Model::quarter_ids_for_user(db, user_id).await?)
    }
}
