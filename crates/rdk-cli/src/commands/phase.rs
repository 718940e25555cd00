use rdk_core::{PhaseUpdate, Workspace};

use super::friendly_error;

/// Run the `phase` subcommand.
pub fn run(workspace: &Workspace, update: &PhaseUpdate) -> anyhow::Result<()> {
    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass --new and/or --progress.");
    }

    let context = workspace.update_phase(update).map_err(friendly_error)?;

    println!("✅ Updated project phase: {}", context.phase());
    if let Some(progress) = update.progress {
        println!("   Progress: {progress}%");
    }
    Ok(())
}
