//! Check-in classification and the checkout / return pairing.

use chrono::{DateTime, Utc};
use db::minutes::whole_minutes_between;
use db::models::check_in::{self, CheckInStatus};
use db::models::{check_out, quarter, session, user};
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

pub fn parse_check_in_status(raw: &str) -> ServiceResult<CheckInStatus> {
    CheckInStatus::from_str(raw.trim())
        .map_err(|_| ServiceError::Validation(format!("Unknown check-in status '{raw}'")))
}

/// Minutes after the scheduled start, for a `late` mark. Zero for every
/// other status and for arrivals before the start.
pub fn minutes_late(
    status: CheckInStatus,
    session_start: DateTime<Utc>,
    observed_at: DateTime<Utc>,
) -> i64 {
    match status {
        CheckInStatus::Late => whole_minutes_between(session_start, observed_at).max(0),
        _ => 0,
    }
}

/// An active session whose quarter is also active.
pub(crate) async fn require_session(
    db: &DatabaseConnection,
    session_id: i64,
) -> ServiceResult<session::Model> {
    let not_found = || ServiceError::NotFound(format!("Session {session_id} not found"));

    let session = session::Model::find_active(db, session_id)
        .await?
        .ok_or_else(not_found)?;
    if quarter::Model::find_active(db, session.quarter_id).await?.is_none() {
        return Err(not_found());
    }
    Ok(session)
}

pub(crate) async fn require_student(
    db: &DatabaseConnection,
    user_id: i64,
) -> ServiceResult<user::Model> {
    user::Model::find_active(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Student {user_id} not found")))
}

pub struct AttendanceService;

impl AttendanceService {
    /// Records (or replaces) the student's classification for the session.
    ///
    /// Repeating the call with the same arguments leaves exactly one row in
    /// the same state.
    pub async fn record_check_in(
        db: &DatabaseConnection,
        user_id: i64,
        session_id: i64,
        status: CheckInStatus,
        observed_at: DateTime<Utc>,
    ) -> ServiceResult<check_in::Model> {
        let session = require_session(db, session_id).await?;
        require_student(db, user_id).await?;

        let late = minutes_late(status, session.starts_at(), observed_at);

        let txn = db.begin().await?;
        let row =
            check_in::Model::put(&txn, user_id, session_id, status, late, observed_at).await?;
        txn.commit().await?;

        info!(user_id, session_id, %status, minutes_late = late, "check-in recorded");
        Ok(row)
    }

    /// Opens a checkout for the student.
    ///
    /// Fails with `Conflict` while another checkout for the same student and
    /// session is still open. The lookup catches the sequential case with a
    /// readable message; the partial unique index on open rows catches two
    /// writers racing past it.
    pub async fn open_check_out(
        db: &DatabaseConnection,
        user_id: i64,
        session_id: i64,
        at: DateTime<Utc>,
    ) -> ServiceResult<check_out::Model> {
        require_session(db, session_id).await?;
        require_student(db, user_id).await?;

        let txn = db.begin().await?;
        if let Some(open) = check_out::Model::find_open(&txn, user_id, session_id).await? {
            warn!(user_id, session_id, open_id = open.id, "checkout already open");
            return Err(ServiceError::Conflict(format!(
                "Student {user_id} is already checked out of session {session_id}"
            )));
        }

        let row = check_out::Model::open(&txn, user_id, session_id, at)
            .await
            .map_err(|e| open_check_out_error(e, user_id, session_id))?;
        txn.commit().await?;

        info!(user_id, session_id, check_out_id = row.id, "checked out");
        Ok(row)
    }

    /// Closes the open checkout, if any, stamping `at` as the return time.
    ///
    /// Returns `None` and writes nothing when no checkout is open.
    pub async fn close_check_out(
        db: &DatabaseConnection,
        user_id: i64,
        session_id: i64,
        at: DateTime<Utc>,
    ) -> ServiceResult<Option<check_out::Model>> {
        require_session(db, session_id).await?;
        require_student(db, user_id).await?;

        let txn = db.begin().await?;
        let Some(open) = check_out::Model::find_open(&txn, user_id, session_id).await? else {
            debug!(user_id, session_id, "no open checkout to close");
            return Ok(None);
        };

        if at < open.check_out_time {
            return Err(ServiceError::Validation(format!(
                "Return time {at} is before checkout time {}",
                open.check_out_time
            )));
        }

        let row = check_out::Model::close(&txn, open, at).await?;
        txn.commit().await?;

        info!(
            user_id,
            session_id,
            check_out_id = row.id,
            duration_minutes = row.duration_minutes,
            "checked back in"
        );
        Ok(Some(row))
    }
}

/// A unique violation on insert means another writer opened a checkout
/// between the lookup and the insert.
fn open_check_out_error(err: DbErr, user_id: i64, session_id: i64) -> ServiceError {
    match ServiceError::from(err) {
        ServiceError::Conflict(_) => {
            warn!(user_id, session_id, "concurrent checkout rejected by open-row index");
            ServiceError::Conflict(format!(
                "Student {user_id} is already checked out of session {session_id}"
            ))
        }
        other => other,
    }
}
