use db::models::contribution::{self, ContributionQuality};
use sea_orm::DatabaseConnection;
use std::str::FromStr;
use tracing::info;

use crate::attendance::{require_session, require_student};
use crate::error::{ServiceError, ServiceResult};

pub fn parse_quality(raw: &str) -> ServiceResult<ContributionQuality> {
    ContributionQuality::from_str(raw.trim())
        .map_err(|_| ServiceError::Validation(format!("Unknown contribution quality '{raw}'")))
}

fn clean_notes(notes: Option<&str>) -> Option<&str> {
    notes.map(str::trim).filter(|n| !n.is_empty())
}

pub struct ContributionService;

impl ContributionService {
    pub async fn add(
        db: &DatabaseConnection,
        user_id: i64,
        session_id: i64,
        quality: ContributionQuality,
        notes: Option<&str>,
    ) -> ServiceResult<contribution::Model> {
        require_session(db, session_id).await?;
        require_student(db, user_id).await?;

        let row =
            contribution::Model::create(db, user_id, session_id, quality, clean_notes(notes))
                .await?;
        info!(user_id, session_id, contribution_id = row.id, %quality, "contribution added");
        Ok(row)
    }

    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        quality: ContributionQuality,
        notes: Option<&str>,
    ) -> ServiceResult<contribution::Model> {
        let row = contribution::Model::edit(db, id, quality, clean_notes(notes)).await?;
        info!(contribution_id = id, %quality, "contribution edited");
        Ok(row)
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<()> {
        if !contribution::Model::remove(db, id).await? {
            return Err(ServiceError::NotFound(format!("Contribution {id} not found")));
        }
        info!(contribution_id = id, "contribution deleted");
        Ok(())
    }
}
