//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use crate::parser::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched by [`Config::load_from_dir`], in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tidemark.yml", "tidemark.yaml"];

const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

const DEFAULT_DB_PATH: &str = ":memory:";

const DEFAULT_TABLE: &str = "tidemark_migrations";

/// Main project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bookkeeping table recording applied migrations
    #[serde(default = "default_table")]
    pub table: String,

    /// Exact line contents that end a statement (e.g. `GO`)
    #[serde(default)]
    pub line_separator: Option<String>,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            table: default_table(),
            line_separator: None,
        }
    }
}

fn default_migrations_dir() -> String {
    DEFAULT_MIGRATIONS_DIR.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for tidemark.yml or tidemark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map_or_else(
                || {
                    Err(CoreError::ConfigNotFound {
                        path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                    })
                },
                |path| Self::load(&path),
            )
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.table.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Migration table name cannot be empty".to_string(),
            });
        }

        // The table name is interpolated into bookkeeping SQL.
        if !self
            .table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "Migration table name '{}' may only contain letters, digits, '_' and '.'",
                    self.table
                ),
            });
        }

        if self.migrations_dir.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if self.line_separator.as_deref() == Some("") {
            return Err(CoreError::ConfigInvalid {
                message: "line_separator cannot be empty; omit it to disable".to_string(),
            });
        }

        Ok(())
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Parser options derived from this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            line_separator: self.line_separator.clone(),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
