use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use db::models::check_in::CheckInStatus;
use db::models::{quarter, session, user};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::debug;

use super::{EventIndex, SessionTally, StudentIdentity, SummaryService};
use crate::attendance::require_session;
use crate::error::{ServiceError, ServiceResult};
use crate::policy::{AbsencePolicy, AttendanceStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSessionSummary {
    #[serde(flatten)]
    pub student: StudentIdentity,
    pub check_in_status: Option<CheckInStatus>,
    pub minutes_late: i64,
    pub total_checkout_minutes: i64,
    pub total_absence_minutes: i64,
    pub time_remaining: i64,
    pub status: AttendanceStatus,
    pub contribution_count: usize,
    pub average_contribution_quality: Option<f64>,
    pub is_currently_checked_out: bool,
    pub current_checkout_time: Option<DateTime<Utc>>,
}

impl StudentSessionSummary {
    pub fn from_tally(student: StudentIdentity, tally: &SessionTally, policy: &AbsencePolicy) -> Self {
        let absence = tally.absence_minutes();
        Self {
            student,
            check_in_status: tally.check_in_status,
            minutes_late: tally.minutes_late,
            total_checkout_minutes: tally.checkout_minutes,
            total_absence_minutes: absence,
            time_remaining: policy.time_remaining(absence),
            status: policy.classify(absence),
            contribution_count: tally.qualities.len(),
            average_contribution_quality: tally.average_quality(),
            is_currently_checked_out: tally.open_since.is_some(),
            current_checkout_time: tally.open_since,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    pub session_id: i64,
    pub quarter_id: i64,
    pub quarter_name: String,
    pub session_number: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub session: SessionInfo,
    pub students: Vec<StudentSessionSummary>,
}

impl SummaryService {
    /// Per-student figures for every student enrolled in the session's
    /// quarter, ordered by name.
    pub async fn summarize_session(
        db: &DatabaseConnection,
        session_id: i64,
        policy: &AbsencePolicy,
        now: DateTime<Utc>,
    ) -> ServiceResult<SessionReport> {
        let session = require_session(db, session_id).await?;
        let quarter = quarter::Model::find_active(db, session.quarter_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))?;

        let students = user::Model::list_enrolled(db, quarter.id).await?;
        let index = EventIndex::load(db, &[session.id]).await?;

        let summaries = students
            .iter()
            .map(|student| {
                let tally = index.tally(student.id, session.id, now);
                StudentSessionSummary::from_tally(student.into(), &tally, policy)
            })
            .collect::<Vec<_>>();

        debug!(session_id, students = summaries.len(), "session summarized");

        Ok(SessionReport {
            session: session_info(&session, &quarter),
            students: summaries,
        })
    }
}

fn session_info(session: &session::Model, quarter: &quarter::Model) -> SessionInfo {
    SessionInfo {
        session_id: session.id,
        quarter_id: quarter.id,
        quarter_name: quarter.name.clone(),
        session_number: session.session_number,
        session_date: session.session_date,
        start_time: session.start_time,
        end_time: session.end_time,
        is_completed: session.is_completed,
    }
}
