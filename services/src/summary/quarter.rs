use chrono::{DateTime, Utc};
use db::models::check_in::CheckInStatus;
use db::models::contribution::ContributionQuality;
use db::models::{quarter, session, user};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::debug;

use super::{mean_score, EventIndex, SessionTally, StudentIdentity, SummaryService};
use crate::error::ServiceResult;
use crate::policy::{AbsencePolicy, AttendanceStatus};
use crate::quarter::require_quarter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterStudentAttendance {
    #[serde(flatten)]
    pub student: StudentIdentity,
    pub total_sessions_in_quarter: u64,
    pub sessions_attended: u64,
    pub attendance_percentage: f64,
    pub sessions_on_time: u64,
    pub sessions_late: u64,
    pub sessions_missing: u64,
    pub sessions_excused: u64,
    pub total_late_minutes: i64,
    pub total_checkout_minutes: i64,
    pub total_absence_minutes: i64,
    pub time_remaining: i64,
    pub attendance_status: AttendanceStatus,
}

impl QuarterStudentAttendance {
    /// Folds one tally per quarter session. A session without a check-in
    /// counts as missing.
    pub fn from_tallies(
        student: StudentIdentity,
        tallies: &[SessionTally],
        policy: &AbsencePolicy,
    ) -> Self {
        let total_sessions = tallies.len() as u64;
        let count = |wanted: CheckInStatus| {
            tallies
                .iter()
                .filter(|t| t.check_in_status.unwrap_or(CheckInStatus::Missing) == wanted)
                .count() as u64
        };

        let sessions_on_time = count(CheckInStatus::OnTime);
        let sessions_late = count(CheckInStatus::Late);
        let sessions_attended = sessions_on_time + sessions_late;
        let total_late_minutes = tallies.iter().map(|t| t.minutes_late).sum::<i64>();
        let total_checkout_minutes = tallies.iter().map(|t| t.checkout_minutes).sum::<i64>();
        let total_absence_minutes = total_late_minutes + total_checkout_minutes;

        Self {
            student,
            total_sessions_in_quarter: total_sessions,
            sessions_attended,
            attendance_percentage: percentage(sessions_attended, total_sessions),
            sessions_on_time,
            sessions_late,
            sessions_missing: count(CheckInStatus::Missing),
            sessions_excused: count(CheckInStatus::ExcusedAbsence),
            total_late_minutes,
            total_checkout_minutes,
            total_absence_minutes,
            time_remaining: policy.scaled(total_sessions).time_remaining(total_absence_minutes),
            attendance_status: policy.classify_quarter(total_sessions, total_absence_minutes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterStudentContributions {
    #[serde(flatten)]
    pub student: StudentIdentity,
    pub total_contributions: u64,
    pub total_sessions_in_quarter: u64,
    pub avg_contributions_per_session: f64,
    /// `None` when the student has no contributions.
    pub avg_contribution_rating: Option<f64>,
    pub low_quality_count: u64,
    pub medium_quality_count: u64,
    pub high_quality_count: u64,
}

impl QuarterStudentContributions {
    pub fn from_tallies(student: StudentIdentity, tallies: &[SessionTally]) -> Self {
        let qualities: Vec<ContributionQuality> =
            tallies.iter().flat_map(|t| t.qualities.iter().copied()).collect();
        let count = |wanted: ContributionQuality| qualities.iter().filter(|q| **q == wanted).count() as u64;
        let total = qualities.len() as u64;
        let total_sessions = tallies.len() as u64;

        Self {
            student,
            total_contributions: total,
            total_sessions_in_quarter: total_sessions,
            avg_contributions_per_session: ratio(total, total_sessions),
            avg_contribution_rating: mean_score(&qualities),
            low_quality_count: count(ContributionQuality::Low),
            medium_quality_count: count(ContributionQuality::Medium),
            high_quality_count: count(ContributionQuality::High),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterOverviewStats {
    pub total_students: u64,
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub avg_attendance_rate: f64,
    pub avg_contributions_per_student_session: f64,
}

impl QuarterOverviewStats {
    pub fn compute(
        sessions: &[session::Model],
        attendance: &[QuarterStudentAttendance],
        contributions: &[QuarterStudentContributions],
    ) -> Self {
        let total_students = attendance.len() as u64;
        let total_sessions = sessions.len() as u64;
        let avg_attendance_rate = if attendance.is_empty() {
            0.0
        } else {
            attendance.iter().map(|a| a.attendance_percentage).sum::<f64>() / attendance.len() as f64
        };
        let total_contributions = contributions.iter().map(|c| c.total_contributions).sum();

        Self {
            total_students,
            total_sessions,
            completed_sessions: sessions.iter().filter(|s| s.is_completed).count() as u64,
            avg_attendance_rate,
            avg_contributions_per_student_session: ratio(
                total_contributions,
                total_students.saturating_mul(total_sessions),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterReport {
    pub quarter: quarter::Model,
    pub overview: QuarterOverviewStats,
    pub attendance: Vec<QuarterStudentAttendance>,
    pub contributions: Vec<QuarterStudentContributions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterOverview {
    pub quarter: quarter::Model,
    pub stats: QuarterOverviewStats,
}

impl SummaryService {
    /// Aggregates every active session of the quarter for each enrolled
    /// student.
    pub async fn summarize_quarter(
        db: &DatabaseConnection,
        quarter_id: i64,
        policy: &AbsencePolicy,
        now: DateTime<Utc>,
    ) -> ServiceResult<QuarterReport> {
        let quarter = require_quarter(db, quarter_id).await?;
        build_report(db, quarter, policy, now).await
    }

    /// Overview figures for every active quarter, newest first.
    pub async fn list_overviews(
        db: &DatabaseConnection,
        policy: &AbsencePolicy,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<QuarterOverview>> {
        let mut overviews = Vec::new();
        for quarter in quarter::Model::list_active(db).await? {
            let report = build_report(db, quarter, policy, now).await?;
            overviews.push(QuarterOverview {
                quarter: report.quarter,
                stats: report.overview,
            });
        }
        Ok(overviews)
    }
}

async fn build_report(
    db: &DatabaseConnection,
    quarter: quarter::Model,
    policy: &AbsencePolicy,
    now: DateTime<Utc>,
) -> ServiceResult<QuarterReport> {
    let sessions = session::Model::list_for_quarter(db, quarter.id).await?;
    let students = user::Model::list_enrolled(db, quarter.id).await?;
    let session_ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
    let index = EventIndex::load(db, &session_ids).await?;

    let mut attendance = Vec::with_capacity(students.len());
    let mut contributions = Vec::with_capacity(students.len());
    for student in &students {
        let tallies: Vec<SessionTally> = session_ids
            .iter()
            .map(|&session_id| index.tally(student.id, session_id, now))
            .collect();
        attendance.push(QuarterStudentAttendance::from_tallies(
            student.into(),
            &tallies,
            policy,
        ));
        contributions.push(QuarterStudentContributions::from_tallies(
            student.into(),
            &tallies,
        ));
    }

    let overview = QuarterOverviewStats::compute(&sessions, &attendance, &contributions);
    debug!(
        quarter_id = quarter.id,
        students = overview.total_students,
        sessions = overview.total_sessions,
        "quarter summarized"
    );

    Ok(QuarterReport {
        quarter,
        overview,
        attendance,
        contributions,
    })
}

fn percentage(part: u64, whole: u64) -> f64 {
    ratio(part, whole) * 100.0
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn identity() -> StudentIdentity {
        StudentIdentity {
            user_id: 1,
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            student_id: "S001".into(),
        }
    }

    fn tally(status: Option<CheckInStatus>, late: i64, out: i64) -> SessionTally {
        SessionTally {
            check_in_status: status,
            minutes_late: late,
            checkout_minutes: out,
            ..Default::default()
        }
    }

    fn session(id: i64, completed: bool) -> session::Model {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        session::Model {
            id,
            quarter_id: 1,
            session_number: id as i32,
            session_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            is_completed: completed,
            created_at: ts,
            updated_at: ts,
            deleted_at: None,
        }
    }

    #[test]
    fn two_session_scenario_totals_thirty_minutes() {
        let tallies = [
            tally(Some(CheckInStatus::OnTime), 0, 0),
            tally(Some(CheckInStatus::Late), 20, 10),
        ];
        let a = QuarterStudentAttendance::from_tallies(identity(), &tallies, &AbsencePolicy::default());

        assert_eq!(a.total_sessions_in_quarter, 2);
        assert_eq!(a.sessions_attended, 2);
        assert_eq!(a.attendance_percentage, 100.0);
        assert_eq!(a.total_late_minutes, 20);
        assert_eq!(a.total_checkout_minutes, 10);
        assert_eq!(a.total_absence_minutes, 30);
        assert_eq!(a.time_remaining, 60);
        // Two sessions: warning from 60, danger from 90.
        assert_eq!(a.attendance_status, AttendanceStatus::Good);
    }

    #[test]
    fn no_sessions_is_unknown_with_zero_percent() {
        let a = QuarterStudentAttendance::from_tallies(identity(), &[], &AbsencePolicy::default());
        assert_eq!(a.attendance_percentage, 0.0);
        assert!(!a.attendance_percentage.is_nan());
        assert_eq!(a.attendance_status, AttendanceStatus::Unknown);
        assert_eq!(a.time_remaining, 0);
    }

    #[test]
    fn absent_check_in_counts_as_missing() {
        let tallies = [
            tally(None, 0, 0),
            tally(Some(CheckInStatus::Missing), 0, 0),
            tally(Some(CheckInStatus::ExcusedAbsence), 0, 0),
            tally(Some(CheckInStatus::OnTime), 0, 0),
        ];
        let a = QuarterStudentAttendance::from_tallies(identity(), &tallies, &AbsencePolicy::default());
        assert_eq!(a.sessions_missing, 2);
        assert_eq!(a.sessions_excused, 1);
        assert_eq!(a.sessions_on_time, 1);
        assert_eq!(a.sessions_attended, 1);
        assert_eq!(a.attendance_percentage, 25.0);
    }

    #[test]
    fn quarter_status_uses_scaled_cut_points() {
        let tallies = [tally(Some(CheckInStatus::Late), 40, 25), tally(Some(CheckInStatus::OnTime), 0, 0)];
        let a = QuarterStudentAttendance::from_tallies(identity(), &tallies, &AbsencePolicy::default());
        assert_eq!(a.total_absence_minutes, 65);
        assert_eq!(a.attendance_status, AttendanceStatus::Warning);
    }

    #[test]
    fn contribution_tiers_and_rates() {
        let mut first = tally(Some(CheckInStatus::OnTime), 0, 0);
        first.qualities = vec![ContributionQuality::High, ContributionQuality::Low];
        let mut second = tally(Some(CheckInStatus::OnTime), 0, 0);
        second.qualities = vec![ContributionQuality::Medium];
        let third = tally(None, 0, 0);

        let c = QuarterStudentContributions::from_tallies(identity(), &[first, second, third]);
        assert_eq!(c.total_contributions, 3);
        assert_eq!(c.avg_contributions_per_session, 1.0);
        assert_eq!(c.avg_contribution_rating, Some(3.0));
        assert_eq!(c.total_sessions_in_quarter, 3);
        assert_eq!(
            (c.low_quality_count, c.medium_quality_count, c.high_quality_count),
            (1, 1, 1)
        );

        let none = QuarterStudentContributions::from_tallies(identity(), &[]);
        assert_eq!(none.avg_contributions_per_session, 0.0);
        assert_eq!(none.avg_contribution_rating, None);
    }

    #[test]
    fn overview_averages_over_students_and_sessions() {
        let sessions = [session(1, true), session(2, false)];
        let full = QuarterStudentAttendance::from_tallies(
            identity(),
            &[tally(Some(CheckInStatus::OnTime), 0, 0), tally(Some(CheckInStatus::Late), 5, 0)],
            &AbsencePolicy::default(),
        );
        let half = QuarterStudentAttendance::from_tallies(
            identity(),
            &[tally(Some(CheckInStatus::OnTime), 0, 0), tally(None, 0, 0)],
            &AbsencePolicy::default(),
        );
        let mut busy = tally(None, 0, 0);
        busy.qualities = vec![ContributionQuality::Low; 4];
        let contributions = [
            QuarterStudentContributions::from_tallies(identity(), &[busy]),
            QuarterStudentContributions::from_tallies(identity(), &[]),
        ];

        let stats = QuarterOverviewStats::compute(&sessions, &[full, half], &contributions);
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.completed_sessions, 1);
        assert_eq!(stats.avg_attendance_rate, 75.0);
        assert_eq!(stats.avg_contributions_per_student_session, 1.0);
    }

    #[test]
    fn rows_serialize_with_dashboard_field_names() {
        let tallies = [tally(Some(CheckInStatus::OnTime), 0, 0)];
        let a = QuarterStudentAttendance::from_tallies(identity(), &tallies, &AbsencePolicy::default());
        let c = QuarterStudentContributions::from_tallies(identity(), &tallies);

        let a = serde_json::to_value(&a).unwrap();
        assert_eq!(a["total_sessions_in_quarter"], 1);
        assert_eq!(a["user_id"], 1);

        let c = serde_json::to_value(&c).unwrap();
        assert_eq!(c["total_sessions_in_quarter"], 1);
        assert_eq!(c["low_quality_count"], 0);
        assert_eq!(c["medium_quality_count"], 0);
        assert_eq!(c["high_quality_count"], 0);
        assert!(c["avg_contribution_rating"].is_null());
    }

    #[test]
    fn empty_overview_is_all_zero() {
        let stats = QuarterOverviewStats::compute(&[], &[], &[]);
        assert_eq!(stats.avg_attendance_rate, 0.0);
        assert_eq!(stats.avg_contributions_per_student_session, 0.0);
    }
}
