use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::Serialize;

use crate::minutes::whole_minutes_between;

/// A temporary absence from a session. Append-only: rows are inserted open
/// (`check_in_time` unset) and later closed exactly once.
///
/// A partial unique index allows at most one open row per (user, session).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "check_outs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub check_out_time: DateTime<Utc>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
    pub fn is_open(&self) -> bool {
        self.check_in_time.is_none()
    }

    /// Minutes this checkout counts against the absence budget at `now`.
    ///
    /// Closed rows report their stored duration; an open row reports the
    /// time elapsed so far.
    pub fn minutes_absent(&self, now: DateTime<Utc>) -> i64 {
        match (self.check_in_time, self.duration_minutes) {
            (Some(_), Some(duration)) => duration,
            (Some(back), None) => whole_minutes_between(self.check_out_time, back).max(0),
            (None, _) => whole_minutes_between(self.check_out_time, now).max(0),
        }
    }

    pub async fn open<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        session_id: i64,
        check_out_time: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            user_id: Set(user_id),
            session_id: Set(session_id),
            check_out_time: Set(check_out_time),
            check_in_time: Set(None),
            duration_minutes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// The open checkout for (user, session), newest first should more than
    /// one ever exist.
    pub async fn find_open<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        session_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::CheckInTime.is_null())
            .order_by_desc(Column::CheckOutTime)
            .one(db)
            .await
    }

    /// Stamps the return time and stores the whole-minute duration.
    pub async fn close<C: ConnectionTrait>(
        db: &C,
        open: Model,
        check_in_time: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let duration = whole_minutes_between(open.check_out_time, check_in_time);

        let mut active: ActiveModel = open.into();
        active.check_in_time = Set(Some(check_in_time));
        active.duration_minutes = Set(Some(duration));
        active.updated_at = Set(Utc::now());
        active.update(db).await
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
            .order_by_asc(Column::CheckOutTime)
            .all(db)
            .await
    }
}
