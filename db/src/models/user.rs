use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::Serialize;

use crate::lifecycle::HasLifecycle;

/// A student who can be enrolled in quarters and have attendance recorded.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    /// Unique across all students, deleted ones included.
    pub email: String,
    /// Institution-issued student number, shown next to the name.
    pub student_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quarter_enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::check_in::Entity")]
    CheckIns,
    #[sea_orm(has_many = "super::check_out::Entity")]
    CheckOuts,
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
}

impl Related<super::quarter_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::check_in::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CheckIns.def()
    }
}

impl Related<super::check_out::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CheckOuts.def()
    }
}

impl Related<super::contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributions.def()
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
        full_name: &str,
        email: &str,
        student_id: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            full_name: Set(full_name.to_owned()),
            email: Set(email.to_owned()),
            student_id: Set(student_id.to_owned()),
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

    pub async fn list_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::FullName)
            .all(db)
            .await
    }

    /// Active students enrolled in `quarter_id`, ordered by name.
    pub async fn list_enrolled<C: ConnectionTrait>(
        db: &C,
        quarter_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .inner_join(super::quarter_enrollment::Entity)
            .filter(super::quarter_enrollment::Column::QuarterId.eq(quarter_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::FullName)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn email_taken<C: ConnectionTrait>(
        db: &C,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.one(db).await?.is_some())
    }

    pub async fn edit<C: ConnectionTrait>(
        db: &C,
        id: i64,
        full_name: &str,
        email: &str,
        student_id: &str,
    ) -> Result<Model, DbErr> {
        let model = Self::find_active(db, id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Student {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.full_name = Set(full_name.to_owned());
        active.email = Set(email.to_owned());
        active.student_id = Set(student_id.to_owned());
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
            .ok_or_else(|| DbErr::RecordNotFound(format!("Student {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.deleted_at = Set(Some(at));
        active.updated_at = Set(at);
        active.update(db).await
    }
}
