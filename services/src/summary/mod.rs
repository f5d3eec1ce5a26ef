//! Derived attendance figures, computed on demand from the raw event rows.
//!
//! Loading is done once per request: every check-in, checkout and
//! contribution for the relevant sessions is fetched up front and grouped by
//! (user, session) in an [`EventIndex`]. The per-session and per-quarter
//! reports are then pure folds over [`SessionTally`] values.

pub mod quarter;
pub mod session;

pub use quarter::{
    QuarterOverview, QuarterOverviewStats, QuarterReport, QuarterStudentAttendance,
    QuarterStudentContributions,
};
pub use session::{SessionInfo, SessionReport, StudentSessionSummary};

use chrono::{DateTime, Utc};
use db::models::check_in::CheckInStatus;
use db::models::contribution::ContributionQuality;
use db::models::{check_in, check_out, contribution, user};
use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;
use std::collections::HashMap;

pub struct SummaryService;

/// Who a summary row is about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentIdentity {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
}

impl From<&user::Model> for StudentIdentity {
    fn from(user: &user::Model) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            student_id: user.student_id.clone(),
        }
    }
}

type PairKey = (i64, i64);

/// Event rows for a set of sessions, keyed by (user_id, session_id).
#[derive(Debug, Default)]
pub struct EventIndex {
    check_ins: HashMap<PairKey, check_in::Model>,
    check_outs: HashMap<PairKey, Vec<check_out::Model>>,
    contributions: HashMap<PairKey, Vec<ContributionQuality>>,
}

impl EventIndex {
    pub async fn load<C: ConnectionTrait>(db: &C, session_ids: &[i64]) -> Result<Self, DbErr> {
        Ok(Self::build(
            check_in::Model::list_for_sessions(db, session_ids).await?,
            check_out::Model::list_for_sessions(db, session_ids).await?,
            contribution::Model::list_for_sessions(db, session_ids).await?,
        ))
    }

    pub fn build(
        check_ins: Vec<check_in::Model>,
        check_outs: Vec<check_out::Model>,
        contributions: Vec<contribution::Model>,
    ) -> Self {
        let mut index = Self::default();
        for row in check_ins {
            index.check_ins.insert((row.user_id, row.session_id), row);
        }
        for row in check_outs {
            index
                .check_outs
                .entry((row.user_id, row.session_id))
                .or_default()
                .push(row);
        }
        for row in contributions {
            index
                .contributions
                .entry((row.user_id, row.session_id))
                .or_default()
                .push(row.quality);
        }
        index
    }

    /// Everything recorded for one student in one session, with open
    /// checkouts measured up to `now`.
    pub fn tally(&self, user_id: i64, session_id: i64, now: DateTime<Utc>) -> SessionTally {
        let key = (user_id, session_id);
        let check_in = self.check_ins.get(&key);
        let status = check_in.map(|c| c.status);

        let check_outs = self.check_outs.get(&key).map(Vec::as_slice).unwrap_or_default();
        let checkout_minutes = check_outs.iter().map(|c| c.minutes_absent(now)).sum();
        let open_since = check_outs
            .iter()
            .filter(|c| c.is_open())
            .map(|c| c.check_out_time)
            .max();

        SessionTally {
            check_in_status: status,
            minutes_late: match (status, check_in) {
                (Some(CheckInStatus::Late), Some(c)) => c.minutes_late.max(0),
                _ => 0,
            },
            checkout_minutes,
            open_since,
            qualities: self.contributions.get(&key).cloned().unwrap_or_default(),
        }
    }
}

/// One student's raw figures for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTally {
    pub check_in_status: Option<CheckInStatus>,
    pub minutes_late: i64,
    pub checkout_minutes: i64,
    /// Start of the newest open checkout, if the student is out right now.
    pub open_since: Option<DateTime<Utc>>,
    pub qualities: Vec<ContributionQuality>,
}

impl SessionTally {
    pub fn absence_minutes(&self) -> i64 {
        self.minutes_late + self.checkout_minutes
    }

    pub fn attended(&self) -> bool {
        self.check_in_status.is_some_and(|s| s.is_attended())
    }

    pub fn average_quality(&self) -> Option<f64> {
        mean_score(&self.qualities)
    }
}

/// Mean of the 1/3/5 quality scores, `None` when there is nothing to average.
pub(crate) fn mean_score(qualities: &[ContributionQuality]) -> Option<f64> {
    if qualities.is_empty() {
        return None;
    }
    let total: u32 = qualities.iter().map(|q| u32::from(q.score())).sum();
    Some(f64::from(total) / qualities.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, 9, minute, 0).unwrap()
    }

    fn check_in(user_id: i64, status: CheckInStatus, minutes_late: i64) -> check_in::Model {
        check_in::Model {
            id: user_id,
            user_id,
            session_id: 1,
            status,
            minutes_late,
            check_in_time: at(0),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn check_out(id: i64, out: u32, back: Option<u32>) -> check_out::Model {
        check_out::Model {
            id,
            user_id: 1,
            session_id: 1,
            check_out_time: at(out),
            check_in_time: back.map(at),
            duration_minutes: back.map(|b| i64::from(b - out)),
            created_at: at(out),
            updated_at: at(out),
        }
    }

    fn contribution(id: i64, quality: ContributionQuality) -> contribution::Model {
        contribution::Model {
            id,
            user_id: 1,
            session_id: 1,
            quality,
            notes: None,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    #[test]
    fn empty_pair_tallies_to_nothing() {
        let index = EventIndex::default();
        let tally = index.tally(1, 1, at(30));
        assert_eq!(tally, SessionTally::default());
        assert_eq!(tally.absence_minutes(), 0);
        assert!(!tally.attended());
        assert_eq!(tally.average_quality(), None);
    }

    #[test]
    fn late_minutes_plus_closed_and_open_checkouts() {
        let index = EventIndex::build(
            vec![check_in(1, CheckInStatus::Late, 20)],
            vec![check_out(1, 10, Some(20)), check_out(2, 40, None)],
            vec![],
        );
        let now = at(45) + Duration::seconds(30);
        let tally = index.tally(1, 1, now);

        assert_eq!(tally.minutes_late, 20);
        assert_eq!(tally.checkout_minutes, 10 + 5);
        assert_eq!(tally.absence_minutes(), 35);
        assert_eq!(tally.open_since, Some(at(40)));
        assert!(tally.attended());
    }

    #[test]
    fn stored_late_minutes_ignored_for_other_statuses() {
        let index = EventIndex::build(vec![check_in(1, CheckInStatus::Missing, 12)], vec![], vec![]);
        let tally = index.tally(1, 1, at(30));
        assert_eq!(tally.minutes_late, 0);
        assert!(!tally.attended());
    }

    #[test]
    fn quality_average_uses_one_three_five() {
        let index = EventIndex::build(
            vec![],
            vec![],
            vec![
                contribution(1, ContributionQuality::Low),
                contribution(2, ContributionQuality::High),
                contribution(3, ContributionQuality::Medium),
                contribution(4, ContributionQuality::High),
            ],
        );
        let tally = index.tally(1, 1, at(0));
        assert_eq!(tally.qualities.len(), 4);
        assert_eq!(tally.average_quality(), Some(3.5));
    }

    #[test]
    fn events_do_not_leak_between_students() {
        let index = EventIndex::build(
            vec![check_in(2, CheckInStatus::OnTime, 0)],
            vec![check_out(1, 10, Some(15))],
            vec![],
        );
        assert_eq!(index.tally(2, 1, at(30)).checkout_minutes, 0);
        assert_eq!(index.tally(1, 1, at(30)).check_in_status, None);
    }
}
