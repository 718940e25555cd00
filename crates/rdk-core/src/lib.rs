//! Core library for recursive-devkit: parsing, editing and rendering the
//! markdown documents that carry project context between AI-assisted
//! development sessions.

pub mod config;
pub mod context;
pub mod error;
pub mod markdown;
pub mod prompt;
pub mod state;
pub mod workspace;

pub use config::{Config, ConfigError};
pub use context::{InitOptions, ProjectContext};
pub use error::{DevkitError, DevkitResult, DocumentKind};
pub use prompt::PromptContext;
pub use state::{DevelopmentState, FocusField, StateChange, StateUpdate};
pub use workspace::{PhaseUpdate, Workspace, WorkspaceStatus};
