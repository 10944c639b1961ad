//! New command implementation

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tm_core::catalog::MIGRATION_EXTENSION;
use tm_core::parse_version;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::load_project;

const TEMPLATE: &str = "\
-- +migrate Up

-- +migrate Down
";

/// Execute the new command
pub async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let path = create_migration(&project.migrations_dir(), &args.name)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Write an empty Up/Down skeleton numbered one past the highest existing version.
///
/// Only file names are inspected, so a broken migration does not block
/// scaffolding the next one.
pub(crate) fn create_migration(dir: &Path, name: &str) -> Result<PathBuf> {
    let slug = slugify(name);
    if slug.is_empty() {
        bail!("Migration name '{name}' must contain at least one letter or digit");
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let version = next_version(dir)?;
    let path = dir.join(format!("{version:04}_{slug}.{MIGRATION_EXTENSION}"));
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn next_version(dir: &Path) -> Result<i64> {
    let mut highest = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(MIGRATION_EXTENSION) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Ok(version) = parse_version(file_name) {
            highest = highest.max(version);
        }
    }
    Ok(highest + 1)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

#[cfg(test)]
#[path = "new_test.rs"]
mod tests;
