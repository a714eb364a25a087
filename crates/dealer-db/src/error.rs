//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorised by SQLite message                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError::Db (services) ← Alongside ValidationError               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller shows a message                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing row is not an error here. Lookups return `Option`, updates and
//! deletes return [`crate::repository::RowOutcome`].

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The datastore could not be opened.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - Parent directory missing or not writable
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Primary key (or other UNIQUE) violation.
    ///
    /// ## When This Occurs
    /// - Adding a car/customer/employee/user whose id already exists
    /// - Two callers inserting the same previewed sale id
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Every number a sequence can hand out is taken.
    #[error("No ids left in sequence '{0}'")]
    SequenceExhausted(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Statement execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not be started or committed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// No connection became free before the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for failures to reach the datastore at all.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted)
    }

    /// Fills in the offending key of a UniqueViolation.
    pub(crate) fn with_key(self, key: &str) -> Self {
        match self {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, key),
            other => other,
        }
    }

    /// Wraps a begin/commit failure.
    pub(crate) fn transaction(err: sqlx::Error) -> Self {
        match DbError::from(err) {
            DbError::QueryFailed(msg) | DbError::Internal(msg) => DbError::TransactionFailed(msg),
            other => other,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// sqlx::Error::Io             → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(io_err) => DbError::ConnectionFailed(io_err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_connection_error());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_connection_error());
        assert!(!DbError::QueryFailed("syntax".into()).is_connection_error());
    }

    #[test]
    fn test_duplicate_message() {
        let err = DbError::duplicate("cars.id", "C1");
        assert_eq!(err.to_string(), "Duplicate cars.id: 'C1' already exists");
    }

    #[test]
    fn test_with_key_only_touches_unique_violations() {
        let err = DbError::duplicate("cars.id", "unknown").with_key("C1");
        assert_eq!(err.to_string(), "Duplicate cars.id: 'C1' already exists");

        let err = DbError::QueryFailed("syntax".into()).with_key("C1");
        assert!(matches!(err, DbError::QueryFailed(msg) if msg == "syntax"));
    }
}
