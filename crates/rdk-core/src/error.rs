use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// The three documents a devkit workspace manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Context,
    State,
    Prompt,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Context => "context",
            DocumentKind::State => "state",
            DocumentKind::Prompt => "prompt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DevkitError {
    #[error("{kind} file not found: {}", .path.display())]
    NotInitialized { kind: DocumentKind, path: PathBuf },

    #[error("framework files already exist in {}", .root.display())]
    AlreadyInitialized { root: PathBuf },

    #[error("{kind} file has no `## {section}` section")]
    MissingSection {
        kind: DocumentKind,
        section: &'static str,
    },

    #[error("{kind} file has no `{line}` line")]
    MissingLine {
        kind: DocumentKind,
        line: &'static str,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type DevkitResult<T> = Result<T, DevkitError>;
