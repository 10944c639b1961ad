//! Up command implementation

use anyhow::Result;
use tm_core::Direction;

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{load_project, open_migrator, print_plan};

/// Execute the up command
pub async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = open_migrator(&project)?;

    if args.dry_run {
        let steps = migrator.plan(Direction::Up, args.limit).await?;
        print_plan("apply", &steps, global.verbose);
        return Ok(());
    }

    let applied = migrator.exec_max(Direction::Up, args.limit).await?;
    println!("Applied {applied} migration(s).");
    Ok(())
}
