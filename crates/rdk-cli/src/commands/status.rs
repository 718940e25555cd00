use rdk_core::Workspace;

use super::friendly_error;

/// Run the `status` subcommand: print where the project stands.
pub fn run(workspace: &Workspace, json_output: bool) -> anyhow::Result<()> {
    let status = workspace.status().map_err(friendly_error)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}  ({})", status.project, workspace.root().display());
    println!("{}", "-".repeat(40));
    if !status.definition.is_empty() {
        println!("Definition:     {}", status.definition);
    }
    println!("Phase:          {}", status.phase);
    println!("Progress:       {}%", status.progress);
    println!("Current task:   {}", status.current_task);
    println!("Completed:      {}", status.completed_count);
    println!("Decisions:      {}", status.decision_count);
    println!("Next tasks:");
    if status.next_tasks.is_empty() {
        println!("  (none)");
    }
    for (i, task) in status.next_tasks.iter().enumerate() {
        println!("  {}. {task}", i + 1);
    }
    if !status.challenges.is_empty() {
        println!("Challenges:     {}", status.challenges.join(", "));
    }
    if !status.prompt_exists {
        println!("Prompt file missing (run `recursive-devkit prompt`).");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdk_core::{Config, InitOptions};

    #[test]
    fn status_on_initialized_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let ws = Workspace::new(dir.path(), config.files.clone());
        ws.init(&InitOptions::new("Lexi"), &config.prompt, false)
            .unwrap();

        assert!(run(&ws, false).is_ok());
        assert!(run(&ws, true).is_ok());
    }

    #[test]
    fn status_fails_before_init() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path(), Config::default().files);
        assert!(run(&ws, false).is_err());
    }
}
