use common::format_validation_errors;
use sea_orm::{DbErr, SqlErr};
use validator::ValidationErrors;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by every service operation. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed input: bad enum value, empty name, inverted dates.
    #[error("{0}")]
    Validation(String),

    /// The operation referenced a quarter, session, student or row that does
    /// not exist (or has been soft-deleted).
    #[error("{0}")]
    NotFound(String),

    /// The write would break a uniqueness rule: a second open checkout, a
    /// duplicate enrollment, a reused session number or email.
    #[error("{0}")]
    Conflict(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return ServiceError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return ServiceError::NotFound(msg),
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            DbErr::ConnectionAcquire(e) => ServiceError::StorageUnavailable(e.to_string()),
            DbErr::Conn(e) => ServiceError::StorageUnavailable(e.to_string()),
            other => ServiceError::Database(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(format_validation_errors(&errors))
    }
}
