use std::io::Write;

use rdk_core::{Config, InitOptions, Workspace};

use super::friendly_error;

/// Run the `init` subcommand, asking before overwriting existing files.
pub fn run(
    workspace: &Workspace,
    config: &Config,
    opts: &InitOptions,
    force: bool,
) -> anyhow::Result<()> {
    run_with_confirm(workspace, config, opts, force, confirm_overwrite)
}

fn run_with_confirm(
    workspace: &Workspace,
    config: &Config,
    opts: &InitOptions,
    force: bool,
    confirm: impl FnOnce() -> anyhow::Result<bool>,
) -> anyhow::Result<()> {
    let overwrite = if workspace.is_initialized() && !force {
        if !confirm()? {
            println!("Initialization canceled.");
            return Ok(());
        }
        true
    } else {
        force
    };

    let written = workspace
        .init(opts, &config.prompt, overwrite)
        .map_err(friendly_error)?;

    println!("{}", initialized_message(opts));
    for path in written {
        println!("   Created: {}", path.display());
    }
    Ok(())
}

fn initialized_message(opts: &InitOptions) -> String {
    format!("✅ Initialized {} with RecursiveDevKit framework", opts.name())
}

fn confirm_overwrite() -> anyhow::Result<bool> {
    print!("Framework files already exist. Overwrite? (y/n): ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
