//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tm_core::{Catalog, Config, PlannedStep};
use tm_db::{DuckDbBackend, Migrator};

use crate::cli::GlobalArgs;

/// Project root and its resolved configuration
#[derive(Debug)]
pub(crate) struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }
}

/// Load the project configuration, applying global overrides.
///
/// An explicit `--config` must exist. Without it, a project directory with no
/// tidemark.yml runs on defaults.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();

    let mut config = match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config_or_default(&root)?,
    };

    if let Some(database) = &global.database {
        config.database.path = database.clone();
    }

    Ok(Project { root, config })
}

fn load_config_or_default(root: &Path) -> Result<Config> {
    match Config::load_from_dir(root) {
        Ok(config) => Ok(config),
        Err(tm_core::CoreError::ConfigNotFound { path }) => {
            log::debug!("No config at {path}, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load project config"),
    }
}

/// Load the catalog and connect to the configured database.
pub(crate) fn open_migrator(project: &Project) -> Result<Migrator> {
    let migrations_dir = project.migrations_dir();
    let catalog = Catalog::from_dir(&migrations_dir, &project.config.parse_options())
        .with_context(|| format!("Failed to load migrations from {}", migrations_dir.display()))?;

    let db = DuckDbBackend::new(&project.config.database.path)
        .with_context(|| format!("Failed to open database {}", project.config.database.path))?;
    log::debug!(
        "Opened {} with {} migration(s)",
        project.config.database.path,
        catalog.len()
    );

    Ok(Migrator::new(
        Arc::new(db),
        catalog,
        project.config.table.clone(),
    ))
}

/// Print the steps of a plan without running them.
pub(crate) fn print_plan(verb: &str, steps: &[PlannedStep<'_>], verbose: bool) {
    if steps.is_empty() {
        println!("Nothing to {verb}.");
        return;
    }

    println!("Would {verb} {} migration(s):", steps.len());
    for step in steps {
        println!(
            "  {} ({} statement(s))",
            step.migration.name,
            step.statements.len()
        );
        if verbose {
            for statement in step.statements {
                println!("    {}", statement.trim_end().replace('\n', "\n    "));
            }
        }
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
