//! Bookkeeping rows and status reporting

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp layout used when writing and reading `applied_at`.
///
/// `%.f` also accepts values without a fractional part on read.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One row of the bookkeeping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: NaiveDateTime,
}

/// Applied/pending state of one migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub version: i64,
    pub name: String,
    /// `None` while pending
    pub applied_at: Option<NaiveDateTime>,
    /// False when the bookkeeping table lists a version with no migration file
    pub in_catalog: bool,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}
