use chrono::{NaiveDate, Utc};
use db::models::quarter;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::error::{ServiceError, ServiceResult};
use crate::validate::{invalid, non_blank};

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_dates"))]
pub struct QuarterInput {
    #[validate(custom(function = "non_blank", message = "Quarter name is required"))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_dates(input: &QuarterInput) -> Result<(), ValidationError> {
    if input.end_date < input.start_date {
        return Err(invalid("date_order", "End date must not be before start date"));
    }
    Ok(())
}

pub(crate) async fn require_quarter(
    db: &DatabaseConnection,
    quarter_id: i64,
) -> ServiceResult<quarter::Model> {
    quarter::Model::find_active(db, quarter_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Quarter {quarter_id} not found")))
}

pub struct QuarterService;

impl QuarterService {
    pub async fn create(db: &DatabaseConnection, input: QuarterInput) -> ServiceResult<quarter::Model> {
        input.validate()?;
        let row =
            quarter::Model::create(db, input.name.trim(), input.start_date, input.end_date).await?;
        info!(quarter_id = row.id, name = %row.name, "quarter created");
        Ok(row)
    }

    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        input: QuarterInput,
    ) -> ServiceResult<quarter::Model> {
        input.validate()?;
        let row =
            quarter::Model::edit(db, id, input.name.trim(), input.start_date, input.end_date)
                .await?;
        info!(quarter_id = id, "quarter edited");
        Ok(row)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<quarter::Model> {
        require_quarter(db, id).await
    }

    /// Active quarters, newest first. With `include_deleted`, the archive too.
    pub async fn list(
        db: &DatabaseConnection,
        include_deleted: bool,
    ) -> ServiceResult<Vec<quarter::Model>> {
        let rows = if include_deleted {
            quarter::Model::list_all(db).await?
        } else {
            quarter::Model::list_active(db).await?
        };
        Ok(rows)
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<quarter::Model> {
        let row = quarter::Model::soft_delete(db, id, Utc::now()).await?;
        info!(quarter_id = id, "quarter deleted");
        Ok(row)
    }

    pub async fn restore(db: &DatabaseConnection, id: i64) -> ServiceResult<quarter::Model> {
        let row = quarter::Model::restore(db, id).await?;
        info!(quarter_id = id, "quarter restored");
        Ok(row)
    }
}
