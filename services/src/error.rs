use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures raised by the student and account services.
#[derive(Debug, Error)]
pub enum StudentError {
    /// One or more fields were missing or malformed; the message joins every reason.
    #[error("{0}")]
    Validation(String),

    /// A unique key (email or roll number) is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error("Student not found")]
    NotFound,

    /// Authenticated, but not entitled to this record.
    #[error("Not authorized to access this student's information")]
    Forbidden,

    /// Profile photo could not be written.
    #[error("{0}")]
    Storage(String),

    #[error(transparent)]
    Database(DbErr),
}

/// Message for a unique-key collision given the violated constraint text.
pub fn conflict_message(constraint: &str) -> &'static str {
    if constraint.contains("roll_no") {
        "Roll number already exists"
    } else if constraint.contains("email") {
        "Email already exists"
    } else {
        "Duplicate value"
    }
}

impl From<DbErr> for StudentError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                StudentError::Conflict(conflict_message(&detail).to_string())
            }
            _ => StudentError::Database(err),
        }
    }
}
