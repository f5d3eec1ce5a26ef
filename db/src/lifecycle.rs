//! Soft-delete state for quarters, sessions and students.
//!
//! Rows are never removed once events reference them; a `deleted_at`
//! timestamp retires them instead. Every aggregation works on `Active` rows
//! only.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Active,
    Deleted(DateTime<Utc>),
}

impl Lifecycle {
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted(at),
            None => Lifecycle::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }
}

/// Implemented by every soft-deletable model.
pub trait HasLifecycle {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_deleted_at(self.deleted_at())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_timestamp_is_active() {
        assert_eq!(Lifecycle::from_deleted_at(None), Lifecycle::Active);
        assert!(Lifecycle::Active.is_active());
    }

    #[test]
    fn timestamp_marks_deleted() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let state = Lifecycle::from_deleted_at(Some(at));
        assert_eq!(state, Lifecycle::Deleted(at));
        assert!(!state.is_active());
    }

    #[test]
    fn serializes_with_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let json = serde_json::to_value(Lifecycle::Deleted(at)).unwrap();
        assert_eq!(json["deleted"], "2026-03-01T09:00:00Z");
        assert_eq!(serde_json::to_value(Lifecycle::Active).unwrap(), "active");
    }
}
