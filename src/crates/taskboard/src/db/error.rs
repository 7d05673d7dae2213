//! Database error types
//!
//! Classifies raw sqlx failures so that upper layers can log and report them
//! without depending on sqlx internals.

use thiserror::Error;

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection or I/O failure
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Constraint violation (check, foreign key, unique)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Column decoding or type mismatch
    #[error("Data type error: {0}")]
    TypeError(String),

    /// Migration failure
    #[error("Migration failed: {0}")]
    MigrationError(String),

    /// Pool exhausted or closed
    #[error("Connection pool error: {0}")]
    PoolError(String),

    /// Any other query failure
    #[error("Query error: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation()
                {
                    DatabaseError::ConstraintViolation(db_err.message().to_string())
                } else {
                    DatabaseError::QueryError(db_err.message().to_string())
                }
            }
            sqlx::Error::ColumnNotFound(col) => {
                DatabaseError::TypeError(format!("Column not found: {}", col))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DatabaseError::TypeError(format!("Error decoding column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                DatabaseError::TypeError(format!("Decode error: {}", source))
            }
            sqlx::Error::Configuration(msg) => {
                DatabaseError::ConnectionError(format!("Configuration error: {}", msg))
            }
            sqlx::Error::Io(err) => DatabaseError::ConnectionError(format!("IO error: {}", err)),
            sqlx::Error::PoolTimedOut => {
                DatabaseError::PoolError("Connection pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => {
                DatabaseError::PoolError("Connection pool is closed".to_string())
            }
            sqlx::Error::Migrate(err) => DatabaseError::MigrationError(err.to_string()),
            err => DatabaseError::QueryError(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationError(err.to_string())
    }
}
