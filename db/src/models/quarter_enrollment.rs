use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QuerySelect, Set};
use serde::Serialize;

/// Membership of a student in a quarter. Unique per (user, quarter).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quarter_enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub quarter_id: i64,
    pub created_at: DateTime<Utc>,
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
        belongs_to = "super::quarter::Entity",
        from = "Column::QuarterId",
        to = "super::quarter::Column::Id"
    )]
    Quarter,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::quarter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quarter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        quarter_id: i64,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            user_id: Set(user_id),
            quarter_id: Set(quarter_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        quarter_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::QuarterId.eq(quarter_id))
            .one(db)
            .await
    }

    /// Removes the enrollment, returning whether one existed.
    pub async fn remove<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        quarter_id: i64,
    ) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::QuarterId.eq(quarter_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn remove_all_for_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn quarter_ids_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::QuarterId)
            .filter(Column::UserId.eq(user_id))
            .into_tuple()
            .all(db)
            .await
    }
}
