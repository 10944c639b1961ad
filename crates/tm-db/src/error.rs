//! Error types for tm-db

use thiserror::Error;

/// Database and migration execution errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// A step of a migration run failed; the run was rolled back (D003)
    #[error("[D003] {source} handling {version} ({name})")]
    MigrationFailed {
        version: i64,
        name: String,
        #[source]
        source: Box<DbError>,
    },

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Bookkeeping row could not be decoded (D005)
    #[error("[D005] Invalid migration record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
