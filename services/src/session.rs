use chrono::{NaiveDate, NaiveTime, Utc};
use db::models::session;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{info, warn};
use validator::{Validate, ValidationError};

use crate::attendance::require_session;
use crate::error::{ServiceError, ServiceResult};
use crate::quarter::require_quarter;
use crate::validate::invalid;

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_times"))]
pub struct SessionInput {
    #[validate(range(min = 1, message = "Session number must be at least 1"))]
    pub session_number: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

fn validate_times(input: &SessionInput) -> Result<(), ValidationError> {
    if input.end_time <= input.start_time {
        return Err(invalid("time_order", "End time must be after start time"));
    }
    Ok(())
}

pub struct SessionService;

impl SessionService {
    pub async fn create(
        db: &DatabaseConnection,
        quarter_id: i64,
        input: SessionInput,
    ) -> ServiceResult<session::Model> {
        input.validate()?;
        require_quarter(db, quarter_id).await?;

        if session::Model::number_taken(db, quarter_id, input.session_number, None).await? {
            warn!(quarter_id, session_number = input.session_number, "duplicate session number rejected");
            return Err(ServiceError::Conflict(format!(
                "Session {} already exists in quarter {quarter_id}",
                input.session_number
            )));
        }

        let row = session::Model::create(
            db,
            quarter_id,
            input.session_number,
            input.session_date,
            input.start_time,
            input.end_time,
        )
        .await?;
        info!(quarter_id, session_id = row.id, session_number = row.session_number, "session created");
        Ok(row)
    }

    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        input: SessionInput,
    ) -> ServiceResult<session::Model> {
        input.validate()?;
        let current = require_session(db, id).await?;

        if session::Model::number_taken(db, current.quarter_id, input.session_number, Some(id)).await? {
            return Err(ServiceError::Conflict(format!(
                "Session {} already exists in quarter {}",
                input.session_number, current.quarter_id
            )));
        }

        let row = session::Model::edit(
            db,
            id,
            input.session_number,
            input.session_date,
            input.start_time,
            input.end_time,
        )
        .await?;
        info!(session_id = id, "session edited");
        Ok(row)
    }

    pub async fn set_completed(
        db: &DatabaseConnection,
        id: i64,
        completed: bool,
    ) -> ServiceResult<session::Model> {
        let row = session::Model::set_completed(db, id, completed).await?;
        info!(session_id = id, completed, "session completion changed");
        Ok(row)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<session::Model> {
        require_session(db, id).await
    }

    pub async fn list_for_quarter(
        db: &DatabaseConnection,
        quarter_id: i64,
    ) -> ServiceResult<Vec<session::Model>> {
        require_quarter(db, quarter_id).await?;
        Ok(session::Model::list_for_quarter(db, quarter_id).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<session::Model> {
        let row = session::Model::soft_delete(db, id, Utc::now()).await?;
        info!(session_id = id, "session deleted");
        Ok(row)
    }
}
