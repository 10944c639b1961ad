//! Catalog of known migrations, sorted by version

use crate::error::{CoreError, CoreResult};
use crate::migration::{Direction, Migration};
use crate::parser::ParseOptions;
use crate::planner::{plan, PlannedStep};
use std::path::Path;

/// File extension picked up by [`Catalog::from_dir`]
pub const MIGRATION_EXTENSION: &str = "sql";

/// The full, version-sorted collection of migrations for a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    migrations: Vec<Migration>,
}

impl Catalog {
    /// Build a catalog from already constructed migrations.
    ///
    /// Sorts by version and rejects duplicate versions.
    pub fn new(mut migrations: Vec<Migration>) -> CoreResult<Self> {
        migrations.sort_by_key(|m| m.version);

        if let Some(pair) = migrations
            .windows(2)
            .find(|pair| pair[0].version == pair[1].version)
        {
            return Err(CoreError::DuplicateVersion {
                version: pair[0].version,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }

        Ok(Self { migrations })
    }

    /// Parse named documents into a catalog.
    pub fn from_sources<I, N, D>(sources: I, options: &ParseOptions) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: AsRef<str>,
    {
        let migrations = sources
            .into_iter()
            .map(|(name, document)| Migration::parse(name, document.as_ref(), options))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(migrations)
    }

    /// Load every `.sql` file directly inside `dir`.
    ///
    /// Subdirectories and files with other extensions are skipped.
    pub fn from_dir(dir: &Path, options: &ParseOptions) -> CoreResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(MIGRATION_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })?;
            sources.push((name.to_string(), content));
        }

        let catalog = Self::from_sources(sources, options)?;
        log::debug!(
            "Loaded {} migration(s) from {}",
            catalog.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// All migrations in ascending version order
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Iterate in ascending version order
    pub fn iter(&self) -> std::slice::Iter<'_, Migration> {
        self.migrations.iter()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Look up a migration by version
    pub fn get(&self, version: i64) -> Option<&Migration> {
        self.migrations.iter().find(|m| m.version == version)
    }

    /// The highest-versioned migration, if any
    pub fn latest(&self) -> Option<&Migration> {
        self.migrations.last()
    }

    /// Version one past the latest, used when scaffolding a new migration
    pub fn next_version(&self) -> i64 {
        self.latest().map_or(1, |m| m.version + 1)
    }

    /// Plan against this catalog; see [`plan`].
    pub fn plan(&self, last_applied: Option<i64>, direction: Direction) -> Vec<PlannedStep<'_>> {
        plan(&self.migrations, last_applied, direction)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.migrations.iter()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
