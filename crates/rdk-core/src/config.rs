use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Per-project config file name, looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = ".recursive-devkit.toml";

/// Top-level configuration for a devkit workspace.
///
/// Resolution order: an explicit `--config` path, then
/// `<project>/.recursive-devkit.toml`, then
/// `~/.config/recursive-devkit/config.toml`, then built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl Config {
    /// Load the config that applies to `project_root`, falling back to
    /// defaults when no config file exists.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::resolve(project_root, Self::user_path().as_deref())
    }

    /// Like [`Config::load`] but with an explicit user-level fallback path.
    pub fn resolve(project_root: &Path, user_path: Option<&Path>) -> Result<Self, ConfigError> {
        let project_path = project_root.join(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            return Self::load_from(project_path);
        }
        match user_path {
            Some(path) if path.exists() => Self::load_from(path),
            _ => {
                let cfg = Config::default();
                cfg.validate()?;
                Ok(cfg)
            }
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let cfg: Config = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Semantic validation for settings that are not fully expressible via type checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.files.validate()?;
        self.prompt.validate()?;
        Ok(())
    }

    fn user_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(".config")
                .join("recursive-devkit")
                .join("config.toml")
        })
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// File names of the three framework documents, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_context_file")]
    pub context: String,
    #[serde(default = "default_state_file")]
    pub state: String,
    #[serde(default = "default_prompt_file")]
    pub prompt: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            context: default_context_file(),
            state: default_state_file(),
            prompt: default_prompt_file(),
        }
    }
}

fn default_context_file() -> String {
    "project-context.md".into()
}
fn default_state_file() -> String {
    "development-state.md".into()
}
fn default_prompt_file() -> String {
    "prompt-template.md".into()
}

impl FilesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let entries = [
            ("files.context", &self.context),
            ("files.state", &self.state),
            ("files.prompt", &self.prompt),
        ];
        let mut seen = HashSet::new();
        for (key, name) in entries {
            let name = name.as_str();
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if name.trim() != name {
                return Err(ConfigError::Validation(format!(
                    "{key} must not start or end with whitespace, got `{name}`"
                )));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name, got `{name}`"
                )));
            }
            if !seen.insert(name) {
                return Err(ConfigError::Validation(format!(
                    "{key} duplicates another file name (`{name}`)"
                )));
            }
        }
        Ok(())
    }
}

/// How much of the state document makes it into a generated prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Most recent completed entries to include.
    #[serde(default = "default_completed_limit")]
    pub completed_limit: usize,
    /// Upcoming tasks to include.
    #[serde(default = "default_next_limit")]
    pub next_limit: usize,
    /// Most recent decisions to include.
    #[serde(default = "default_decisions_limit")]
    pub decisions_limit: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            completed_limit: default_completed_limit(),
            next_limit: default_next_limit(),
            decisions_limit: default_decisions_limit(),
        }
    }
}

fn default_completed_limit() -> usize {
    3
}
fn default_next_limit() -> usize {
    3
}
fn default_decisions_limit() -> usize {
    2
}

impl PromptConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("prompt.completed_limit", self.completed_limit),
            ("prompt.next_limit", self.next_limit),
            ("prompt.decisions_limit", self.decisions_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{key} must be at least 1")));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_file_names_fail_validation() {
        let mut cfg = Config::default();
        cfg.files.prompt = cfg.files.state.clone();
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("files.prompt"));
    }

    #[test]
    fn nested_file_names_fail_validation() {
        let mut cfg = Config::default();
        cfg.files.context = "docs/context.md".into();
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("plain file name"));
    }

    #[test]
    fn padded_file_names_fail_validation() {
        let mut cfg = Config::default();
        cfg.files.context = " project-context.md".into();
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("files.context"));
        assert!(err.to_string().contains("whitespace"));

        cfg.files.context = "project-context.md\t".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_limit_fails_validation() {
        let mut cfg = Config::default();
        cfg.prompt.next_limit = 0;
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("prompt.next_limit"));
    }

    #[test]
    fn unknown_log_format_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str("[general]\nlog_format = \"xml\"\n");
        assert!(result.is_err());
    }
}
