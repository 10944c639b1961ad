//! Parse command implementation

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use tm_core::{parse_migration, Direction, ParsedMigration};

use crate::cli::{GlobalArgs, ParseArgs};
use crate::commands::common::load_project;

/// Execute the parse command
pub async fn execute(args: &ParseArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let parsed = parse_migration(BufReader::new(file), &project.config.parse_options())
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    print_section(&parsed, Direction::Up);
    println!();
    print_section(&parsed, Direction::Down);
    Ok(())
}

fn print_section(parsed: &ParsedMigration, direction: Direction) {
    let statements = parsed.statements(direction);
    println!("-- {direction}: {} statement(s)", statements.len());
    for (idx, statement) in statements.iter().enumerate() {
        println!("-- [{}]", idx + 1);
        print!("{statement}");
    }
}
