use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::Serialize;

use crate::lifecycle::HasLifecycle;

/// One scheduled class meeting within a quarter.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quarter_id: i64,
    /// Display ordinal, unique within the quarter.
    pub session_number: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quarter::Entity",
        from = "Column::QuarterId",
        to = "super::quarter::Column::Id"
    )]
    Quarter,
    #[sea_orm(has_many = "super::check_in::Entity")]
    CheckIns,
    #[sea_orm(has_many = "super::check_out::Entity")]
    CheckOuts,
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
}

impl Related<super::quarter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quarter.def()
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
    /// Scheduled start as an instant. Session dates and times are stored
    /// without a zone and read as UTC.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.session_date.and_time(self.start_time).and_utc()
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        quarter_id: i64,
        session_number: i32,
        session_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            quarter_id: Set(quarter_id),
            session_number: Set(session_number),
            session_date: Set(session_date),
            start_time: Set(start_time),
            end_time: Set(end_time),
            is_completed: Set(false),
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

    /// Active sessions of a quarter in display order.
    pub async fn list_for_quarter<C: ConnectionTrait>(
        db: &C,
        quarter_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::QuarterId.eq(quarter_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::SessionNumber)
            .all(db)
            .await
    }

    /// Whether `session_number` is already used in the quarter. Deleted
    /// sessions still hold their number because the unique index covers them.
    pub async fn number_taken<C: ConnectionTrait>(
        db: &C,
        quarter_id: i64,
        session_number: i32,
        exclude_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find()
            .filter(Column::QuarterId.eq(quarter_id))
            .filter(Column::SessionNumber.eq(session_number));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.one(db).await?.is_some())
    }

    pub async fn edit<C: ConnectionTrait>(
        db: &C,
        id: i64,
        session_number: i32,
        session_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Model, DbErr> {
        let model = Self::find_active(db, id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Session {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.session_number = Set(session_number);
        active.session_date = Set(session_date);
        active.start_time = Set(start_time);
        active.end_time = Set(end_time);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn set_completed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        completed: bool,
    ) -> Result<Model, DbErr> {
        let model = Self::find_active(db, id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Session {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.is_completed = Set(completed);
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
            .ok_or_else(|| DbErr::RecordNotFound(format!("Session {id} not found")))?;

        let mut active: ActiveModel = model.into();
        active.deleted_at = Set(Some(at));
        active.updated_at = Set(at);
        active.update(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quarter;
    use crate::test_utils::setup_test_db;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn starts_at_combines_date_and_time() {
        let now = Utc::now();
        let session = Model {
            id: 1,
            quarter_id: 1,
            session_number: 1,
            session_date: date(2026, 1, 12),
            start_time: time(9, 30),
            end_time: time(11, 0),
            is_completed: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        assert_eq!(
            session.starts_at(),
            Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn sessions_list_in_number_order_without_deleted() {
        let db = setup_test_db().await;
        let q = quarter::Model::create(&db, "Winter 2026", date(2026, 1, 5), date(2026, 3, 20))
            .await
            .unwrap();

        let s2 = Model::create(&db, q.id, 2, date(2026, 1, 19), time(9, 0), time(11, 0))
            .await
            .unwrap();
        let s1 = Model::create(&db, q.id, 1, date(2026, 1, 12), time(9, 0), time(11, 0))
            .await
            .unwrap();
        let s3 = Model::create(&db, q.id, 3, date(2026, 1, 26), time(9, 0), time(11, 0))
            .await
            .unwrap();
        Model::soft_delete(&db, s3.id, Utc::now()).await.unwrap();

        let ids: Vec<i64> = Model::list_for_quarter(&db, q.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![s1.id, s2.id]);

        assert!(Model::number_taken(&db, q.id, 3, None).await.unwrap());
        assert!(!Model::number_taken(&db, q.id, 2, Some(s2.id)).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_number_violates_unique_index() {
        let db = setup_test_db().await;
        let q = quarter::Model::create(&db, "Winter 2026", date(2026, 1, 5), date(2026, 3, 20))
            .await
            .unwrap();

        Model::create(&db, q.id, 1, date(2026, 1, 12), time(9, 0), time(11, 0))
            .await
            .unwrap();
        let err = Model::create(&db, q.id, 1, date(2026, 1, 13), time(9, 0), time(11, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ));
    }
}
