//! The development state document (`development-state.md`).
//!
//! Tracks what is being worked on right now (the High Priority focus lines),
//! what has been done, what comes next, open challenges and recorded
//! decisions. Completed entries are prepended, so the list reads newest
//! first. Decisions are appended and read oldest first.

use serde::{Deserialize, Serialize};

use crate::error::{DevkitError, DevkitResult, DocumentKind};
use crate::markdown::{label, Document, Section};

const HIGH_PRIORITY: &str = "High Priority";
const COMPLETED: &str = "Completed";
const NEXT_TASKS: &str = "Next Tasks";
const CHALLENGES: &str = "Challenges";
const DECISIONS: &str = "Decisions";
const PLACEHOLDER: &str = "None yet";

const INITIAL_STATE: &str = "# Development State

## High Priority
- CURRENT TASK: Initialize project structure
- COMPLETION CRITERIA: Repository structure and base files created
- WORKING FILES: Initial repository setup
- INTEGRATION POINTS: None yet

## Completed
- Framework initialization

## Next Tasks
1. Define initial architecture
   - Files: architecture documents, diagrams
   - Integration: Overall system design
2. Set up core components
   - Files: base implementation files
   - Integration: Component interfaces

## Challenges
- None yet

## Decisions
- Using RecursiveDevKit framework for development
  - Rationale: Structured approach to AI-assisted development
  - Alternatives: Ad-hoc prompting, traditional development
";

const PHASE_RESET_STATE: &str = "# Development State

## High Priority
- CURRENT TASK: Initialize phase
- COMPLETION CRITERIA: Phase initialization complete
- WORKING FILES: Initial phase files
- INTEGRATION POINTS: None yet

## Completed
- Previous phase completion

## Next Tasks
1. First task in new phase
   - Files: To be determined
   - Integration: To be determined

## Challenges
- None yet

## Decisions
- Phase transition
  - Rationale: Previous phase completed
  - Alternatives: Continue previous phase
";

// ---------------------------------------------------------------------------
// FocusField
// ---------------------------------------------------------------------------

/// One of the `- KEY: value` lines in the High Priority section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusField {
    CurrentTask,
    CompletionCriteria,
    WorkingFiles,
    IntegrationPoints,
}

impl FocusField {
    pub fn key(self) -> &'static str {
        match self {
            FocusField::CurrentTask => "CURRENT TASK",
            FocusField::CompletionCriteria => "COMPLETION CRITERIA",
            FocusField::WorkingFiles => "WORKING FILES",
            FocusField::IntegrationPoints => "INTEGRATION POINTS",
        }
    }

    /// Value used when the line is missing from the document.
    pub fn fallback(self) -> &'static str {
        match self {
            FocusField::CurrentTask => "implementation",
            FocusField::CompletionCriteria => "Task complete",
            FocusField::WorkingFiles => "relevant files",
            FocusField::IntegrationPoints => "related components",
        }
    }
}

// ---------------------------------------------------------------------------
// StateUpdate
// ---------------------------------------------------------------------------

/// A batch of edits to the state document, applied in a fixed order:
/// reset, completion, next task (with its criteria, files and integration
/// points), challenge, decision.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub reset: bool,
    pub completed: Option<String>,
    pub next_task: Option<String>,
    /// Only applied together with `next_task`.
    pub criteria: Option<String>,
    /// Only applied together with `next_task`.
    pub files: Option<String>,
    /// Only applied together with `next_task`.
    pub integration: Option<String>,
    pub challenge: Option<String>,
    pub decision: Option<String>,
    pub rationale: Option<String>,
}

impl StateUpdate {
    pub fn is_empty(&self) -> bool {
        !self.reset
            && self.completed.is_none()
            && self.next_task.is_none()
            && self.challenge.is_none()
            && self.decision.is_none()
    }
}

/// What [`DevelopmentState::apply`] actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub reset: bool,
    /// The full `<task>: <summary>` entry that was recorded.
    pub completed: Option<String>,
    pub next_task: Option<String>,
    pub challenge: Option<String>,
    pub decision: Option<String>,
}

// ---------------------------------------------------------------------------
// DevelopmentState
// ---------------------------------------------------------------------------

/// Parsed `development-state.md`.
#[derive(Debug, Clone)]
pub struct DevelopmentState {
    doc: Document,
}

impl DevelopmentState {
    pub fn parse(text: &str) -> Self {
        Self {
            doc: Document::parse(text),
        }
    }

    pub fn scaffold() -> Self {
        Self::parse(INITIAL_STATE)
    }

    /// State document for the start of a new phase.
    pub fn phase_reset() -> Self {
        Self::parse(PHASE_RESET_STATE)
    }

    pub fn render(&self) -> String {
        self.doc.render()
    }

    /// Value of a focus line. Looks in High Priority first, then anywhere
    /// in the document.
    pub fn focus(&self, field: FocusField) -> String {
        self.doc
            .section(HIGH_PRIORITY)
            .and_then(|s| s.field(field.key()))
            .or_else(|| {
                self.doc
                    .sections()
                    .iter()
                    .find_map(|s| s.field(field.key()))
            })
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| field.fallback().to_string())
    }

    pub fn current_task(&self) -> String {
        self.focus(FocusField::CurrentTask)
    }

    /// Completed entries, newest first.
    pub fn completed(&self) -> Vec<String> {
        self.doc
            .section(COMPLETED)
            .map(|s| s.bullets())
            .unwrap_or_default()
    }

    pub fn next_tasks(&self) -> Vec<String> {
        self.doc
            .section(NEXT_TASKS)
            .map(|s| s.numbered())
            .unwrap_or_default()
    }

    /// Challenge labels, skipping the `None yet` placeholder.
    pub fn challenges(&self) -> Vec<String> {
        self.doc
            .section(CHALLENGES)
            .map(|s| {
                s.bullets()
                    .iter()
                    .filter(|item| item.as_str() != PLACEHOLDER)
                    .map(|item| label(item))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Decision labels, oldest first.
    pub fn decisions(&self) -> Vec<String> {
        self.doc
            .section(DECISIONS)
            .map(|s| s.bullets().iter().map(|item| label(item)).collect())
            .unwrap_or_default()
    }

    /// Prepend `<current task>: <summary>` to Completed and return the entry.
    pub fn record_completion(&mut self, summary: &str) -> DevkitResult<String> {
        let summary = non_empty(summary, "completion summary")?;
        let entry = format!("{}: {summary}", self.current_task());
        self.section_mut(COMPLETED)?.push_front_bullet(&entry);
        tracing::debug!(entry = %entry, "recorded completion");
        Ok(entry)
    }

    pub fn set_focus(&mut self, field: FocusField, value: &str) -> DevkitResult<()> {
        let key = field.key();
        let value = non_empty(value, key)?;
        let in_priority = self
            .doc
            .section_mut(HIGH_PRIORITY)
            .is_some_and(|s| s.set_field(key, value));
        let replaced = in_priority
            || self
                .doc
                .sections_mut()
                .iter_mut()
                .any(|s| s.set_field(key, value));
        if replaced {
            Ok(())
        } else {
            Err(DevkitError::MissingLine {
                kind: DocumentKind::State,
                line: field.key(),
            })
        }
    }

    /// Append a challenge. A `- None yet` placeholder bullet is dropped,
    /// everything else in the section stays.
    pub fn add_challenge(&mut self, text: &str) -> DevkitResult<()> {
        let text = non_empty(text, "challenge")?;
        let section = self.section_mut(CHALLENGES)?;
        section.remove_bullet(PLACEHOLDER);
        section.push_bullet(text);
        Ok(())
    }

    /// Append a decision with an optional rationale sub-bullet.
    pub fn add_decision(&mut self, text: &str, rationale: Option<&str>) -> DevkitResult<()> {
        let text = non_empty(text, "decision")?;
        let mut lines = vec![format!("- {text}")];
        if let Some(rationale) = rationale.filter(|r| !r.trim().is_empty()) {
            let rationale = non_empty(rationale, "rationale")?;
            lines.push(format!("  - Rationale: {rationale}"));
        }
        self.section_mut(DECISIONS)?.push_lines(lines);
        Ok(())
    }

    /// Apply a batch of edits in order.
    pub fn apply(&mut self, update: &StateUpdate) -> DevkitResult<StateChange> {
        let mut change = StateChange::default();

        if update.reset {
            *self = Self::phase_reset();
            change.reset = true;
        }

        if let Some(summary) = &update.completed {
            change.completed = Some(self.record_completion(summary)?);
        }

        if let Some(next) = &update.next_task {
            self.set_focus(FocusField::CurrentTask, next)?;
            let optional = [
                (FocusField::CompletionCriteria, &update.criteria),
                (FocusField::WorkingFiles, &update.files),
                (FocusField::IntegrationPoints, &update.integration),
            ];
            for (field, value) in optional {
                if let Some(value) = value {
                    self.set_focus(field, value)?;
                }
            }
            change.next_task = Some(next.trim().to_string());
        }

        if let Some(challenge) = &update.challenge {
            self.add_challenge(challenge)?;
            change.challenge = Some(challenge.trim().to_string());
        }

        if let Some(decision) = &update.decision {
            self.add_decision(decision, update.rationale.as_deref())?;
            change.decision = Some(decision.trim().to_string());
        }

        Ok(change)
    }

    fn section_mut(&mut self, name: &'static str) -> DevkitResult<&mut Section> {
        self.doc
            .section_mut(name)
            .ok_or(DevkitError::MissingSection {
                kind: DocumentKind::State,
                section: name,
            })
    }
}

/// Trimmed single-line value. Line breaks would start new lines or headings
/// in the document.
fn non_empty<'a>(value: &'a str, what: &str) -> DevkitResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DevkitError::InvalidInput(format!("{what} must not be empty")))
    } else if trimmed.contains(['\n', '\r']) {
        Err(DevkitError::InvalidInput(format!("{what} must be a single line")))
    } else {
        Ok(trimmed)
    }
}
