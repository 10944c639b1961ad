//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::record::{MigrationRecord, TIMESTAMP_FORMAT};
use crate::traits::Database;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(format!("{e}: {}", sql.trim())))
    }

    /// Check if relation exists synchronously
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;

        // Handle schema-qualified names
        let (schema, table) = name.rsplit_once('.').unwrap_or(("main", name));

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn applied_records_sync(&self, table: &str) -> DbResult<Vec<MigrationRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, file_name, CAST(applied_at AS VARCHAR) FROM {table} ORDER BY id"
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (version, name, applied_at) = row?;
            let applied_at = NaiveDateTime::parse_from_str(&applied_at, TIMESTAMP_FORMAT)
                .map_err(|e| {
                    DbError::InvalidRecord(format!(
                        "applied_at '{applied_at}' of version {version}: {e}"
                    ))
                })?;
            records.push(MigrationRecord {
                version,
                name,
                applied_at,
            });
        }
        Ok(records)
    }

    fn insert_record_sync(&self, table: &str, record: &MigrationRecord) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {table} (id, file_name, applied_at) VALUES (?, ?, CAST(? AS TIMESTAMP))"
            ),
            duckdb::params![
                record.version,
                record.name,
                record.applied_at.format(TIMESTAMP_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    fn delete_record_sync(&self, table: &str, version: i64) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!("DELETE FROM {table} WHERE id = ?"),
            duckdb::params![version],
        )?;
        Ok(())
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn begin(&self) -> DbResult<()> {
        self.execute_batch_sync("BEGIN TRANSACTION")
    }

    async fn commit(&self) -> DbResult<()> {
        self.execute_batch_sync("COMMIT")
    }

    async fn rollback(&self) -> DbResult<()> {
        self.execute_batch_sync("ROLLBACK")
    }

    async fn ensure_migration_table(&self, table: &str) -> DbResult<()> {
        if let Some((schema, _)) = table.rsplit_once('.') {
            self.execute_batch_sync(&format!("CREATE SCHEMA IF NOT EXISTS {schema}"))?;
        }
        self.execute_batch_sync(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                 id         BIGINT PRIMARY KEY,
                 file_name  VARCHAR NOT NULL,
                 applied_at TIMESTAMP NOT NULL
             )"
        ))
    }

    async fn applied_records(&self, table: &str) -> DbResult<Vec<MigrationRecord>> {
        self.applied_records_sync(table)
    }

    async fn insert_record(&self, table: &str, record: &MigrationRecord) -> DbResult<()> {
        self.insert_record_sync(table, record)
    }

    async fn delete_record(&self, table: &str, version: i64) -> DbResult<()> {
        self.delete_record_sync(table, version)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
