use rdk_core::{StateUpdate, Workspace};

use super::friendly_error;

/// Run the `state` subcommand.
pub fn run(workspace: &Workspace, update: &StateUpdate) -> anyhow::Result<()> {
    if update.is_empty() {
        anyhow::bail!(
            "Nothing to update. Pass --completed, --next, --challenge, --decision or --reset."
        );
    }

    let change = workspace.update_state(update).map_err(friendly_error)?;

    let action = if change.reset { "Reset" } else { "Updated" };
    println!("✅ {action} development state");
    if let Some(entry) = &change.completed {
        println!("   Marked task as completed: {entry}");
    }
    if let Some(next) = &change.next_task {
        println!("   New current task: {next}");
    }
    if let Some(challenge) = &change.challenge {
        println!("   Recorded challenge: {challenge}");
    }
    if let Some(decision) = &change.decision {
        println!("   Recorded decision: {decision}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdk_core::{Config, InitOptions};

    fn initialized() -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let ws = Workspace::new(dir.path(), config.files.clone());
        ws.init(&InitOptions::new("Lexi"), &config.prompt, false)
            .unwrap();
        (dir, ws)
    }

    #[test]
    fn empty_update_is_rejected() {
        let (_dir, ws) = initialized();
        assert!(run(&ws, &StateUpdate::default()).is_err());
    }

    #[test]
    fn completion_and_next_task_are_saved() {
        let (_dir, ws) = initialized();
        let update = StateUpdate {
            completed: Some("Laid out crates".into()),
            next_task: Some("Write the lexer".into()),
            integration: Some("parser".into()),
            ..Default::default()
        };
        run(&ws, &update).unwrap();

        let state = ws.load_state().unwrap();
        assert_eq!(state.current_task(), "Write the lexer");
        assert_eq!(
            state.completed()[0],
            "Initialize project structure: Laid out crates"
        );
    }

    #[test]
    fn decision_without_section_fails() {
        let (_dir, ws) = initialized();
        std::fs::write(
            ws.path(rdk_core::DocumentKind::State),
            "# Development State\n",
        )
        .unwrap();
        let update = StateUpdate {
            decision: Some("Adopt clap".into()),
            ..Default::default()
        };
        let err = run(&ws, &update).expect_err("no Decisions section");
        assert!(err.to_string().contains("Decisions"));
    }
}
