//! tm-db - Database layer for Tidemark
//!
//! This crate provides the `Database` trait, a DuckDB implementation, and the
//! [`Migrator`] that executes plans against a database while keeping the
//! bookkeeping table in sync.

pub mod duckdb;
pub mod error;
pub mod migrator;
pub mod record;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use migrator::Migrator;
pub use record::{MigrationRecord, MigrationStatus};
pub use traits::Database;
