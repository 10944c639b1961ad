//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tidemark - apply and revert versioned SQL migrations
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override database path (DuckDB file or :memory:)
    #[arg(short, long, global = true, env = "TIDEMARK_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations
    Up(UpArgs),

    /// Revert applied migrations (the most recent one by default)
    Down(DownArgs),

    /// Show applied and pending migrations
    Status(StatusArgs),

    /// Create a new migration file
    New(NewArgs),

    /// Print the statements parsed from a migration file
    Parse(ParseArgs),
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Maximum number of migrations to apply (0 = all pending)
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Show what would run without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the down command
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Maximum number of migrations to revert
    #[arg(short, long, default_value_t = 1, conflicts_with = "all")]
    pub limit: usize,

    /// Revert every applied migration
    #[arg(long)]
    pub all: bool,

    /// Show what would run without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl DownArgs {
    /// Step limit handed to the migrator (0 = unlimited)
    pub fn max_steps(&self) -> usize {
        if self.all {
            0
        } else {
            self.limit
        }
    }
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Short description used in the file name, e.g. "create_users"
    pub name: String,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Migration file to parse
    pub file: PathBuf,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
