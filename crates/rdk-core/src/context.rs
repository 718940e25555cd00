//! The project context document (`project-context.md`).
//!
//! Holds the long-lived facts about a project: its name and definition, the
//! phase it is in, progress through that phase, the architecture outline and
//! the principles every prompt should carry.

use crate::error::{DevkitError, DevkitResult, DocumentKind};
use crate::markdown::{label, Document};

const NAME: &str = "Name";
const DEFINITION: &str = "Definition";
const CURRENT_PHASE: &str = "Current Phase";
const ARCHITECTURE: &str = "Architecture";
const PRINCIPLES: &str = "Development Principles";
const PROGRESS_PREFIX: &str = "Progress:";

/// Options for scaffolding a new project.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub project_name: String,
    pub description: String,
    pub phases: u32,
    pub initial_phase: String,
}

impl InitOptions {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            description: "A software project".into(),
            phases: 3,
            initial_phase: "Initialization".into(),
        }
    }

    /// Project name as written into the documents.
    pub fn name(&self) -> &str {
        self.project_name.trim()
    }

    pub fn validate(&self) -> DevkitResult<()> {
        if self.name().is_empty() {
            return Err(DevkitError::InvalidInput(
                "project name must not be empty".into(),
            ));
        }
        let multi_line = |value: &str| value.trim().contains(['\n', '\r']);
        if multi_line(&self.project_name) || multi_line(&self.initial_phase) {
            return Err(DevkitError::InvalidInput(
                "project name and phase must be single lines".into(),
            ));
        }
        if self
            .description
            .lines()
            .any(|line| line.starts_with("## "))
        {
            return Err(DevkitError::InvalidInput(
                "description must not contain `## ` headings".into(),
            ));
        }
        if self.phases == 0 {
            return Err(DevkitError::InvalidInput(
                "a project needs at least one phase".into(),
            ));
        }
        Ok(())
    }
}

/// Parsed `project-context.md`.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    doc: Document,
}

impl ProjectContext {
    pub fn parse(text: &str) -> Self {
        Self {
            doc: Document::parse(text),
        }
    }

    /// Fresh context document for a new project.
    pub fn scaffold(opts: &InitOptions) -> Self {
        let text = format!(
            "# Project Context

## Name
{name}

## Definition
{description}

## Current Phase: 1/{phases} - {initial_phase}
Progress: 0% complete

## Architecture
- Core system: Initial implementation pending
  - Base components: To be determined
- Infrastructure: Initial setup pending

## Dependencies
- None yet

## Development Principles
- Modularity
- Testability
- Maintainability
- Clear interfaces
- Documentation

## Technical Requirements
- Reliable operation
- Good performance
- Proper error handling
",
            name = opts.name(),
            description = opts.description.trim(),
            phases = opts.phases,
            initial_phase = opts.initial_phase.trim(),
        );
        Self::parse(&text)
    }

    pub fn render(&self) -> String {
        self.doc.render()
    }

    pub fn name(&self) -> String {
        self.doc
            .section(NAME)
            .map(|s| s.body())
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| "Project".into())
    }

    pub fn definition(&self) -> String {
        self.doc
            .section(DEFINITION)
            .map(|s| s.body())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> String {
        self.doc
            .section(CURRENT_PHASE)
            .and_then(|s| s.heading_value())
            .map(str::to_string)
            .unwrap_or_else(|| "Current phase".into())
    }

    /// Percent complete, read from the `Progress: N%` line.
    pub fn progress(&self) -> u8 {
        self.doc
            .section(CURRENT_PHASE)
            .and_then(|s| s.lines.iter().find_map(|line| parse_progress(line)))
            .unwrap_or(0)
    }

    pub fn architecture(&self) -> Vec<String> {
        match self.doc.section(ARCHITECTURE) {
            Some(section) => section.bullets(),
            None => vec!["Initial architecture".into()],
        }
    }

    pub fn principles(&self) -> Vec<String> {
        match self.doc.section(PRINCIPLES) {
            Some(section) => section.bullets().iter().map(|item| label(item)).collect(),
            None => vec!["Modularity".into(), "Maintainability".into()],
        }
    }

    /// Rename the current phase, e.g. `2/3 - Feature Development`.
    pub fn set_phase(&mut self, phase: &str) -> DevkitResult<()> {
        let phase = phase.trim();
        if phase.is_empty() {
            return Err(DevkitError::InvalidInput("phase must not be empty".into()));
        }
        if phase.contains(['\n', '\r']) {
            return Err(DevkitError::InvalidInput("phase must be a single line".into()));
        }
        if self
            .doc
            .set_heading(CURRENT_PHASE, &format!("{CURRENT_PHASE}: {phase}"))
        {
            Ok(())
        } else {
            Err(DevkitError::MissingSection {
                kind: DocumentKind::Context,
                section: CURRENT_PHASE,
            })
        }
    }

    /// Rewrite the percentage on the `Progress:` line, keeping any text after
    /// the first `%`. The old value does not need to be a valid number.
    pub fn set_progress(&mut self, percent: u8) -> DevkitResult<()> {
        if percent > 100 {
            return Err(DevkitError::InvalidInput(format!(
                "progress must be between 0 and 100, got {percent}"
            )));
        }
        let section = self
            .doc
            .section_mut(CURRENT_PHASE)
            .ok_or(DevkitError::MissingSection {
                kind: DocumentKind::Context,
                section: CURRENT_PHASE,
            })?;
        let line = section
            .lines
            .iter_mut()
            .find(|line| is_progress_line(line.as_str()))
            .ok_or(DevkitError::MissingLine {
                kind: DocumentKind::Context,
                line: "Progress: N%",
            })?;

        let rest = line
            .split_once('%')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default();
        *line = format!("{PROGRESS_PREFIX} {percent}%{rest}");
        Ok(())
    }
}

fn is_progress_line(line: &str) -> bool {
    line.trim_start().starts_with(PROGRESS_PREFIX)
}

/// Percentage on a `Progress: N%` line, `None` unless it is in `0..=100`.
fn parse_progress(line: &str) -> Option<u8> {
    let value = line.trim_start().strip_prefix(PROGRESS_PREFIX)?;
    let (number, _) = value.split_once('%')?;
    number.trim().parse().ok().filter(|percent| *percent <= 100)
}
