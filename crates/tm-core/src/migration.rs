//! Migration types and version naming

use crate::error::{CoreError, CoreResult};
use crate::parser::{parse_migration_str, ParseOptions};
use std::fmt;

/// Which way a migration run moves the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Apply pending migrations, oldest first
    Up,
    /// Revert applied migrations, newest first
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// One versioned unit of forward and reverse statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Version number taken from the leading digits of `name`
    pub version: i64,
    /// Source name, usually the file name
    pub name: String,
    /// Statements run when applying
    pub up: Vec<String>,
    /// Statements run when reverting
    pub down: Vec<String>,
}

impl Migration {
    /// Parse `document` and name the result.
    pub fn parse(
        name: impl Into<String>,
        document: &str,
        options: &ParseOptions,
    ) -> CoreResult<Self> {
        let name = name.into();
        let version = parse_version(&name)?;
        let parsed = parse_migration_str(document, options).map_err(|source| {
            CoreError::MigrationParse {
                name: name.clone(),
                version,
                source,
            }
        })?;
        Ok(Self {
            version,
            name,
            up: parsed.up_statements,
            down: parsed.down_statements,
        })
    }

    /// Statements for the given direction.
    pub fn statements(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }
}

/// Extract the version number from a migration name.
///
/// The name must start with one or more decimal digits, e.g.
/// `20240101_create_users.sql` or `3.sql`.
pub fn parse_version(name: &str) -> CoreResult<i64> {
    let digits_end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(name.len(), |(idx, _)| idx);

    name[..digits_end]
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidVersionName {
            name: name.to_string(),
        })
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
