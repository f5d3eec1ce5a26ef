use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CheckInReq {
    pub user_id: i64,
    pub status: String,
    /// When the status was observed; defaults to the time of the request.
    pub observed_at: Option<DateTime<Utc>>,
}

/// Body for opening and closing a checkout.
#[derive(Debug, Deserialize)]
pub struct CheckOutReq {
    pub user_id: i64,
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ContributionReq {
    pub user_id: i64,
    pub quality: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletedReq {
    pub completed: bool,
}
