use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::Serialize;

use crate::lifecycle::HasLifecycle;

/// An academic term. Owns sessions and enrollments.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quarters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::quarter_enrollment::Entity")]
    Enrollments,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::quarter_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl HasLifecycle for Model {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            name: Set(name.to_owned()),
            start_date: Set(start_date),
            end_date: Set(end_date),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_active<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(db)
            .await
    }

    /// Active quarters, most recent start date first.
    pub async fn list_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::StartDate)
            .all(db)
            .await
    }

    /// Every quarter including deleted ones, for the archive view.
    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::StartDate)
            .all(db)
            .await
    }

    pub async fn edit<C: ConnectionTrait>(
        db: &C,
        id: i64,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Model, DbErr> {
        let model = Self::find_active(db, id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Quarter {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.name = Set(name.to_owned());
        active.start_date = Set(start_date);
        active.end_date = Set(end_date);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn soft_delete<C: ConnectionTrait>(
        db: &C,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let model = Self::find_active(db, id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Quarter {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.deleted_at = Set(Some(at));
        active.updated_at = Set(at);
        active.update(db).await
    }

    pub async fn restore<C: ConnectionTrait>(db: &C, id: i64) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .filter(Column::DeletedAt.is_not_null())
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Deleted quarter {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
