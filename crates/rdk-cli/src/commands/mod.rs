pub mod init;
pub mod phase;
pub mod prompt;
pub mod state;
pub mod status;

use std::path::Path;

use rdk_core::{Config, DevkitError};

/// Load the config from `--config` when given, otherwise by discovery.
pub fn load_config(project_dir: &Path, explicit: Option<&Path>) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => Config::load_from(path)?,
        None => Config::load(project_dir)?,
    };
    Ok(config)
}

/// Map core errors to user-facing messages with a next step.
pub fn friendly_error(err: DevkitError) -> anyhow::Error {
    match err {
        DevkitError::NotInitialized { kind, path } => anyhow::anyhow!(
            "{kind} file not found at {}.\n  \
             (hint: run `recursive-devkit init <project-name>` first)",
            path.display()
        ),
        DevkitError::AlreadyInitialized { root } => anyhow::anyhow!(
            "Framework files already exist in {}.\n  \
             (hint: pass --force to overwrite them)",
            root.display()
        ),
        other => anyhow::Error::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdk_core::DocumentKind;

    #[test]
    fn not_initialized_mentions_init() {
        let err = friendly_error(DevkitError::NotInitialized {
            kind: DocumentKind::State,
            path: "development-state.md".into(),
        });
        let msg = err.to_string();
        assert!(msg.starts_with("state file not found"));
        assert!(msg.contains("recursive-devkit init"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());
        assert!(load_config(dir.path(), None).is_ok());
    }
}
