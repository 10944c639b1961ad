//! Down command implementation

use anyhow::Result;
use tm_core::Direction;

use crate::cli::{DownArgs, GlobalArgs};
use crate::commands::common::{load_project, open_migrator, print_plan};

/// Execute the down command
pub async fn execute(args: &DownArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = open_migrator(&project)?;
    let max = args.max_steps();

    if args.dry_run {
        let steps = migrator.plan(Direction::Down, max).await?;
        print_plan("revert", &steps, global.verbose);
        return Ok(());
    }

    let reverted = migrator.exec_max(Direction::Down, max).await?;
    println!("Reverted {reverted} migration(s).");
    Ok(())
}
