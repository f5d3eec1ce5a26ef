use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Attendance classification of one student for one session.
///
/// Not historical: there is at most one row per (user, session) and a new
/// classification replaces the old one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "check_ins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub status: CheckInStatus,
    /// Non-zero only when `status` is `Late`.
    pub minutes_late: i64,
    pub check_in_time: DateTime<Utc>,
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
pub enum CheckInStatus {
    #[sea_orm(string_value = "on_time")]
    OnTime,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "missing")]
    Missing,
    #[sea_orm(string_value = "excused_absence")]
    ExcusedAbsence,
}

impl CheckInStatus {
    /// On-time and late both count as present.
    pub fn is_attended(&self) -> bool {
        matches!(self, CheckInStatus::OnTime | CheckInStatus::Late)
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
    pub async fn find_for<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        session_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::SessionId.eq(session_id))
            .one(db)
            .await
    }

    /// Writes the classification for (user, session), replacing any previous
    /// one in place. Run inside a transaction so the lookup and the write
    /// see the same row.
    pub async fn put<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        session_id: i64,
        status: CheckInStatus,
        minutes_late: i64,
        check_in_time: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        match Self::find_for(db, user_id, session_id).await? {
            Some(existing) => {
                let mut active: ActiveModel = existing.into();
                active.status = Set(status);
                active.minutes_late = Set(minutes_late);
                active.check_in_time = Set(check_in_time);
                active.updated_at = Set(now);
                active.update(db).await
            }
            None => {
                ActiveModel {
                    user_id: Set(user_id),
                    session_id: Set(session_id),
                    status: Set(status),
                    minutes_late: Set(minutes_late),
                    check_in_time: Set(check_in_time),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await
            }
        }
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
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parses_wire_names() {
        assert_eq!(CheckInStatus::from_str("on_time").unwrap(), CheckInStatus::OnTime);
        assert_eq!(
            CheckInStatus::from_str("EXCUSED_ABSENCE").unwrap(),
            CheckInStatus::ExcusedAbsence
        );
        assert!(CheckInStatus::from_str("tardy").is_err());
        assert_eq!(CheckInStatus::Late.to_string(), "late");
    }

    #[test]
    fn only_on_time_and_late_count_as_attended() {
        assert!(CheckInStatus::OnTime.is_attended());
        assert!(CheckInStatus::Late.is_attended());
        assert!(!CheckInStatus::Missing.is_attended());
        assert!(!CheckInStatus::ExcusedAbsence.is_attended());
    }
}
