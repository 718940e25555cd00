//! File I/O for a devkit project directory.
//!
//! [`Workspace`] resolves the three document paths from [`FilesConfig`] and is
//! the only place that touches the filesystem. Every operation is
//! load-modify-save on whole files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{FilesConfig, PromptConfig};
use crate::context::{InitOptions, ProjectContext};
use crate::error::{DevkitError, DevkitResult, DocumentKind};
use crate::prompt::PromptContext;
use crate::state::{DevelopmentState, StateChange, StateUpdate};

/// Requested changes to the current phase.
#[derive(Debug, Clone, Default)]
pub struct PhaseUpdate {
    pub phase: Option<String>,
    pub progress: Option<u8>,
}

impl PhaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.phase.is_none() && self.progress.is_none()
    }
}

/// Point-in-time summary of a workspace, for `status` output.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceStatus {
    pub project: String,
    pub definition: String,
    pub phase: String,
    pub progress: u8,
    pub current_task: String,
    pub completed_count: usize,
    pub next_tasks: Vec<String>,
    pub challenges: Vec<String>,
    pub decision_count: usize,
    pub prompt_exists: bool,
}

pub struct Workspace {
    root: PathBuf,
    files: FilesConfig,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, files: FilesConfig) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, kind: DocumentKind) -> PathBuf {
        let name = match kind {
            DocumentKind::Context => &self.files.context,
            DocumentKind::State => &self.files.state,
            DocumentKind::Prompt => &self.files.prompt,
        };
        self.root.join(name)
    }

    /// `true` when any of the framework files already exists.
    pub fn is_initialized(&self) -> bool {
        [DocumentKind::Context, DocumentKind::State, DocumentKind::Prompt]
            .into_iter()
            .any(|kind| self.path(kind).exists())
    }

    /// Scaffold the context, state and prompt files.
    ///
    /// Refuses to touch an initialized workspace unless `overwrite` is set.
    /// Returns the written paths in context, state, prompt order.
    pub fn init(
        &self,
        opts: &InitOptions,
        limits: &PromptConfig,
        overwrite: bool,
    ) -> DevkitResult<Vec<PathBuf>> {
        opts.validate()?;
        if self.is_initialized() && !overwrite {
            return Err(DevkitError::AlreadyInitialized {
                root: self.root.clone(),
            });
        }

        std::fs::create_dir_all(&self.root).map_err(|source| DevkitError::Io {
            path: self.root.clone(),
            source,
        })?;

        let context = ProjectContext::scaffold(opts);
        let state = DevelopmentState::scaffold();
        let prompt = PromptContext::build(&context, &state, limits, None);

        self.save_context(&context)?;
        self.save_state(&state)?;
        self.write_prompt(&prompt)?;

        tracing::info!(
            project = %opts.name(),
            root = %self.root.display(),
            "initialized workspace"
        );
        Ok(vec![
            self.path(DocumentKind::Context),
            self.path(DocumentKind::State),
            self.path(DocumentKind::Prompt),
        ])
    }

    pub fn load_context(&self) -> DevkitResult<ProjectContext> {
        self.read(DocumentKind::Context)
            .map(|text| ProjectContext::parse(&text))
    }

    pub fn load_state(&self) -> DevkitResult<DevelopmentState> {
        self.read(DocumentKind::State)
            .map(|text| DevelopmentState::parse(&text))
    }

    pub fn save_context(&self, context: &ProjectContext) -> DevkitResult<()> {
        self.write(DocumentKind::Context, &context.render())
    }

    pub fn save_state(&self, state: &DevelopmentState) -> DevkitResult<()> {
        self.write(DocumentKind::State, &state.render())
    }

    pub fn write_prompt(&self, prompt: &PromptContext) -> DevkitResult<()> {
        self.write(DocumentKind::Prompt, &prompt.render())
    }

    /// Rebuild the prompt file from the current context and state.
    pub fn generate_prompt(
        &self,
        focus: Option<&str>,
        limits: &PromptConfig,
    ) -> DevkitResult<PromptContext> {
        let context = self.load_context()?;
        let state = self.load_state()?;
        let prompt = PromptContext::build(&context, &state, limits, focus);
        self.write_prompt(&prompt)?;
        tracing::info!(task = %prompt.task, "generated prompt");
        Ok(prompt)
    }

    pub fn update_state(&self, update: &StateUpdate) -> DevkitResult<StateChange> {
        let mut state = self.load_state()?;
        let change = state.apply(update)?;
        self.save_state(&state)?;
        tracing::info!(?change, "updated development state");
        Ok(change)
    }

    pub fn update_phase(&self, update: &PhaseUpdate) -> DevkitResult<ProjectContext> {
        let mut context = self.load_context()?;
        if let Some(phase) = &update.phase {
            context.set_phase(phase)?;
        }
        if let Some(progress) = update.progress {
            context.set_progress(progress)?;
        }
        self.save_context(&context)?;
        tracing::info!(phase = ?update.phase, progress = ?update.progress, "updated phase");
        Ok(context)
    }

    pub fn status(&self) -> DevkitResult<WorkspaceStatus> {
        let context = self.load_context()?;
        let state = self.load_state()?;
        Ok(WorkspaceStatus {
            project: context.name(),
            definition: context.definition(),
            phase: context.phase(),
            progress: context.progress(),
            current_task: state.current_task(),
            completed_count: state.completed().len(),
            next_tasks: state.next_tasks(),
            challenges: state.challenges(),
            decision_count: state.decisions().len(),
            prompt_exists: self.path(DocumentKind::Prompt).exists(),
        })
    }

    fn read(&self, kind: DocumentKind) -> DevkitResult<String> {
        let path = self.path(kind);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(%kind, path = %path.display(), bytes = text.len(), "read document");
                Ok(text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DevkitError::NotInitialized { kind, path })
            }
            Err(source) => Err(DevkitError::Io { path, source }),
        }
    }

    fn write(&self, kind: DocumentKind, text: &str) -> DevkitResult<()> {
        let path = self.path(kind);
        std::fs::write(&path, text).map_err(|source| DevkitError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(%kind, path = %path.display(), bytes = text.len(), "wrote document");
        Ok(())
    }
}
