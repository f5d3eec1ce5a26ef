use chrono::{DateTime, NaiveDate, Utc};
use db::{HasLifecycle, Lifecycle, models::quarter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct QuarterResponse {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<quarter::Model> for QuarterResponse {
    fn from(q: quarter::Model) -> Self {
        Self {
            lifecycle: q.lifecycle(),
            id: q.id,
            name: q.name,
            start_date: q.start_date,
            end_date: q.end_date,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuartersQuery {
    #[serde(default)]
    pub include_deleted: bool,
}
