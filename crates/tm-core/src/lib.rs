//! tm-core - Core library for Tidemark
//!
//! This crate provides the migration document parser, the version-sorted
//! catalog, the migration planner, and project configuration. Nothing here
//! touches a database; plans are plain data handed to an executor.

pub mod catalog;
pub mod config;
pub mod error;
pub mod migration;
pub mod parser;
pub mod planner;

pub use catalog::Catalog;
pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult, ParseError, ParseResult};
pub use migration::{parse_version, Direction, Migration};
pub use parser::{parse_migration, parse_migration_str, ParseOptions, ParsedMigration};
pub use planner::{plan, PlannedStep};
