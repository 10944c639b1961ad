//! Migration executor
//!
//! Wires a [`Catalog`] to a [`Database`]: reads the bookkeeping table,
//! asks the planner what to run, and executes the plan inside one
//! transaction. Runs through the same [`Migrator`] are serialized.

use crate::error::{DbError, DbResult};
use crate::record::{MigrationRecord, MigrationStatus};
use crate::traits::Database;
use std::collections::BTreeMap;
use std::sync::Arc;
use tm_core::{Catalog, Direction, PlannedStep};
use tokio::sync::Mutex;

/// Applies and reverts the migrations of one catalog against one database
pub struct Migrator {
    db: Arc<dyn Database>,
    catalog: Catalog,
    table: String,
    /// Held for the duration of one run
    run_lock: Mutex<()>,
}

impl Migrator {
    pub fn new(db: Arc<dyn Database>, catalog: Catalog, table: impl Into<String>) -> Self {
        Self {
            db,
            catalog,
            table: table.into(),
            run_lock: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Highest applied version, creating the bookkeeping table if needed.
    pub async fn last_applied(&self) -> DbResult<Option<i64>> {
        self.db.ensure_migration_table(&self.table).await?;
        self.watermark().await
    }

    async fn watermark(&self) -> DbResult<Option<i64>> {
        let records = self.db.applied_records(&self.table).await?;
        Ok(records.iter().map(|r| r.version).max())
    }

    /// Compute the steps a run would execute, without executing them.
    ///
    /// `max` limits the number of steps; 0 means no limit.
    pub async fn plan(&self, direction: Direction, max: usize) -> DbResult<Vec<PlannedStep<'_>>> {
        let last_applied = self.last_applied().await?;
        Ok(self.limited_plan(last_applied, direction, max))
    }

    fn limited_plan(
        &self,
        last_applied: Option<i64>,
        direction: Direction,
        max: usize,
    ) -> Vec<PlannedStep<'_>> {
        let mut steps = self.catalog.plan(last_applied, direction);
        if max > 0 {
            steps.truncate(max);
        }
        steps
    }

    /// Execute every pending step for `direction`.
    ///
    /// Returns the number of migrations applied or reverted.
    pub async fn exec(&self, direction: Direction) -> DbResult<usize> {
        self.exec_max(direction, 0).await
    }

    /// Execute at most `max` steps for `direction` (0 means no limit).
    ///
    /// The whole run happens in a single transaction; any failure rolls it
    /// back and nothing is recorded.
    pub async fn exec_max(&self, direction: Direction, max: usize) -> DbResult<usize> {
        let _guard = self.run_lock.lock().await;

        self.db.ensure_migration_table(&self.table).await?;
        self.db.begin().await?;

        match self.run(direction, max).await {
            Ok(count) => {
                if let Err(commit_err) = self.db.commit().await {
                    self.rollback_quietly().await;
                    return Err(commit_err);
                }
                log::debug!(
                    "Migrated {direction}: {count} migration(s) on {}",
                    self.db.db_type()
                );
                Ok(count)
            }
            Err(e) => {
                self.rollback_quietly().await;
                Err(e)
            }
        }
    }

    async fn rollback_quietly(&self) {
        if let Err(rollback_err) = self.db.rollback().await {
            log::error!("Failed to roll back: {rollback_err}");
        }
    }

    async fn run(&self, direction: Direction, max: usize) -> DbResult<usize> {
        let last_applied = self.watermark().await?;
        let steps = self.limited_plan(last_applied, direction, max);

        let mut count = 0;
        for step in &steps {
            let migration = step.migration;
            let wrap = |source: DbError| DbError::MigrationFailed {
                version: migration.version,
                name: migration.name.clone(),
                source: Box::new(source),
            };

            match direction {
                Direction::Up => log::info!("Applying {}", migration.name),
                Direction::Down => log::info!("Reverting {}", migration.name),
            }

            for statement in step.statements {
                self.db.execute_batch(statement).await.map_err(wrap)?;
            }

            match direction {
                Direction::Up => {
                    let record = MigrationRecord {
                        version: migration.version,
                        name: migration.name.clone(),
                        applied_at: chrono::Utc::now().naive_utc(),
                    };
                    self.db
                        .insert_record(&self.table, &record)
                        .await
                        .map_err(wrap)?;
                }
                Direction::Down => {
                    self.db
                        .delete_record(&self.table, migration.version)
                        .await
                        .map_err(wrap)?;
                }
            }

            count += 1;
        }

        Ok(count)
    }

    /// Applied/pending state of every catalog migration.
    ///
    /// Bookkeeping rows without a matching migration are included with
    /// `in_catalog == false`, sorted in among the others by version.
    /// Read-only: a missing bookkeeping table means nothing is applied.
    pub async fn status(&self) -> DbResult<Vec<MigrationStatus>> {
        let records = if self.db.relation_exists(&self.table).await? {
            self.db.applied_records(&self.table).await?
        } else {
            log::debug!("No bookkeeping table {}, reporting all as pending", self.table);
            Vec::new()
        };
        let mut applied: BTreeMap<i64, MigrationRecord> = records
            .into_iter()
            .map(|r| (r.version, r))
            .collect();

        let mut statuses: Vec<MigrationStatus> = self
            .catalog
            .iter()
            .map(|m| MigrationStatus {
                version: m.version,
                name: m.name.clone(),
                applied_at: applied.remove(&m.version).map(|r| r.applied_at),
                in_catalog: true,
            })
            .collect();

        statuses.extend(applied.into_values().map(|r| MigrationStatus {
            version: r.version,
            name: r.name,
            applied_at: Some(r.applied_at),
            in_catalog: false,
        }));
        statuses.sort_by_key(|s| s.version);

        Ok(statuses)
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
