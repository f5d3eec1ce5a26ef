use chrono::{DateTime, Utc};

/// Whole minutes from `from` to `to`, rounded down.
///
/// Negative spans round toward negative infinity, so callers that need a
/// non-negative figure clamp the result themselves.
pub fn whole_minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(60)
}
