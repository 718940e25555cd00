use rdk_core::{Config, DocumentKind, Workspace};

use super::friendly_error;

/// Run the `prompt` subcommand: rebuild the prompt file from context and state.
pub fn run(
    workspace: &Workspace,
    config: &Config,
    focus: Option<&str>,
    stdout: bool,
) -> anyhow::Result<()> {
    let prompt = workspace
        .generate_prompt(focus, &config.prompt)
        .map_err(friendly_error)?;

    if stdout {
        print!("{}", prompt.render());
        return Ok(());
    }

    println!("✅ Updated prompt for task: {}", prompt.task);
    println!(
        "   Prompt saved to {}",
        workspace.path(DocumentKind::Prompt).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdk_core::InitOptions;

    #[test]
    fn prompt_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let ws = Workspace::new(dir.path(), config.files.clone());

        let err = run(&ws, &config, None, false).expect_err("no files yet");
        assert!(err.to_string().contains("hint: run `recursive-devkit init"));
    }

    #[test]
    fn prompt_with_focus_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let ws = Workspace::new(dir.path(), config.files.clone());
        ws.init(&InitOptions::new("Lexi"), &config.prompt, false)
            .unwrap();

        run(&ws, &config, Some("Tokenize strings"), false).unwrap();

        let text = std::fs::read_to_string(ws.path(DocumentKind::Prompt)).unwrap();
        assert!(text.contains("- Task: Tokenize strings\n"));
    }
}
