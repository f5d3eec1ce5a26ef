//! Absence budget and the good / warning / danger classification.
//!
//! Absence is late minutes plus checked-out minutes. A session carries a
//! fixed allowance; a quarter's allowance and cut points are the per-session
//! figures multiplied by the number of sessions, because the budget accrues
//! per session.

use common::AppConfig;
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Good,
    Warning,
    Danger,
    /// No sessions to judge by. Only produced at quarter level.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbsencePolicy {
    pub budget_minutes: i64,
    pub warning_minutes: i64,
    pub danger_minutes: i64,
}

impl Default for AbsencePolicy {
    fn default() -> Self {
        Self {
            budget_minutes: 45,
            warning_minutes: 30,
            danger_minutes: 45,
        }
    }
}

impl AbsencePolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            budget_minutes: config.absence_budget_minutes,
            warning_minutes: config.warning_threshold_minutes,
            danger_minutes: config.danger_threshold_minutes,
        }
    }

    /// `danger` at or above the danger cut point, `warning` at or above the
    /// warning cut point, otherwise `good`.
    pub fn classify(&self, absence_minutes: i64) -> AttendanceStatus {
        if absence_minutes >= self.danger_minutes {
            AttendanceStatus::Danger
        } else if absence_minutes >= self.warning_minutes {
            AttendanceStatus::Warning
        } else {
            AttendanceStatus::Good
        }
    }

    /// Allowance left; negative once the budget is overdrawn.
    pub fn time_remaining(&self, absence_minutes: i64) -> i64 {
        self.budget_minutes - absence_minutes
    }

    /// The policy for a span of `sessions` sessions.
    pub fn scaled(&self, sessions: u64) -> Self {
        let n = i64::try_from(sessions).unwrap_or(i64::MAX);
        Self {
            budget_minutes: self.budget_minutes.saturating_mul(n),
            warning_minutes: self.warning_minutes.saturating_mul(n),
            danger_minutes: self.danger_minutes.saturating_mul(n),
        }
    }

    /// Quarter-level status: `unknown` with no sessions, otherwise the scaled
    /// thresholds applied to the quarter's total.
    pub fn classify_quarter(&self, sessions: u64, absence_minutes: i64) -> AttendanceStatus {
        if sessions == 0 {
            AttendanceStatus::Unknown
        } else {
            self.scaled(sessions).classify(absence_minutes)
        }
    }
}
