//! Status command implementation

use anyhow::Result;
use tm_db::MigrationStatus;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_project, open_migrator};

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = open_migrator(&project)?;
    let statuses = migrator.status().await?;

    match args.output {
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&statuses)?),
        StatusOutput::Table => print_table(&statuses),
    }

    let missing = statuses.iter().filter(|s| !s.in_catalog).count();
    if missing > 0 {
        log::warn!("{missing} applied migration(s) have no matching file");
    }
    Ok(())
}

fn print_table(statuses: &[MigrationStatus]) {
    if statuses.is_empty() {
        println!("No migrations found.");
        return;
    }

    print!("{}", render_table(statuses));

    let applied = statuses.iter().filter(|s| s.is_applied()).count();
    println!();
    println!(
        "{} applied, {} pending",
        applied,
        statuses.len() - applied
    );
}

/// Name column padded to the widest name, measured in characters
fn render_table(statuses: &[MigrationStatus]) -> String {
    let name_width = statuses
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("MIGRATION".len());

    let mut out = format!("{:<name_width$}  APPLIED\n", "MIGRATION");
    for status in statuses {
        out.push_str(&format!(
            "{:<name_width$}  {}\n",
            status.name,
            format_applied(status)
        ));
    }
    out
}

fn format_applied(status: &MigrationStatus) -> String {
    match (status.applied_at, status.in_catalog) {
        (Some(at), true) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        (Some(at), false) => format!("{} (missing file)", at.format("%Y-%m-%d %H:%M:%S")),
        (None, _) => "pending".to_string(),
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
