use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A qualitative participation mark. Any number per student and session.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub quality: ContributionQuality,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ContributionQuality {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

impl ContributionQuality {
    /// Position on the 1..5 rating scale used by every average.
    pub fn score(&self) -> u8 {
        match self {
            ContributionQuality::Low => 1,
            ContributionQuality::Medium => 3,
            ContributionQuality::High => 5,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::session::Entity",
        from = "Column::SessionId",
        to = "super::session::Column::Id"
    )]
    Session,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        session_id: i64,
        quality: ContributionQuality,
        notes: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            user_id: Set(user_id),
            session_id: Set(session_id),
            quality: Set(quality),
            notes: Set(notes.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn edit<C: ConnectionTrait>(
        db: &C,
        id: i64,
        quality: ContributionQuality,
        notes: Option<&str>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Contribution {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.quality = Set(quality);
        active.notes = Set(notes.map(str::to_owned));
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Deletes by id, returning whether a row was removed.
    pub async fn remove<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn list_for_sessions<C: ConnectionTrait>(
        db: &C,
        session_ids: &[i64],
    ) -> Result<Vec<Model>, DbErr> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::SessionId.is_in(session_ids.iter().copied()))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }
}
