use sea_orm::DatabaseConnection;
use services::AbsencePolicy;

/// Shared by every handler: the connection pool and the absence policy the
/// summaries are computed with.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    policy: AbsencePolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, policy: AbsencePolicy) -> Self {
        Self { db, policy }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn policy(&self) -> &AbsencePolicy {
        &self.policy
    }
}
