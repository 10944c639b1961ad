//! Database trait definition

use crate::error::DbResult;
use crate::record::MigrationRecord;
use async_trait::async_trait;

/// Database abstraction trait for Tidemark
///
/// Implementations must be Send + Sync for async operation. Bookkeeping
/// methods take the table name as configured; it is validated upstream and
/// interpolated as-is.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one or more SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Start a transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Create the bookkeeping table (and its schema) if missing
    async fn ensure_migration_table(&self, table: &str) -> DbResult<()>;

    /// All bookkeeping rows, ordered by version
    async fn applied_records(&self, table: &str) -> DbResult<Vec<MigrationRecord>>;

    /// Record a migration as applied
    async fn insert_record(&self, table: &str, record: &MigrationRecord) -> DbResult<()>;

    /// Forget a migration after it was reverted
    async fn delete_record(&self, table: &str, version: i64) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
