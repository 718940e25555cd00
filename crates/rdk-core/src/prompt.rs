//! Prompt generation.
//!
//! A [`PromptContext`] is a flat snapshot of everything the prompt template
//! needs, pulled from the context and state documents. Rendering it yields
//! the text that gets pasted into the assistant's chat window.

use serde::Serialize;

use crate::config::PromptConfig;
use crate::context::ProjectContext;
use crate::state::{DevelopmentState, FocusField};

const NO_CHALLENGES: &str = "None identified";
const NO_DECISIONS: &str = "No recent decisions";

const REQUIREMENTS: &str = "## Implementation Requirements
1. The implementation should follow the project's development principles
2. Code should be properly documented with comments
3. Handle edge cases and potential errors
4. Integrate well with existing components
5. Be testable and maintainable

Please provide:
1. Implementation code for the current task including:
   - File paths and full implementation code
   - Any necessary changes to dependent files
   - Clear comments explaining key functionality

2. Updated task status for development-state.md:
   - Brief description of implementation approach
   - Key implementation details to document
   - Next logical task to tackle

3. Any architecture updates needed

4. Verification approach:
   - How to verify the implementation works correctly
   - Edge cases to test
   - Integration test approach if applicable
";

/// Everything a rendered prompt contains, already reduced to display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    pub project_name: String,
    pub project_info: String,
    pub task: String,
    pub files: String,
    pub integration_points: String,
    pub completion_criteria: String,
    pub phase: String,
    pub progress: u8,
    pub architecture: String,
    pub principles: String,
    pub completed: String,
    pub next_tasks: String,
    pub challenges: String,
    pub decisions: String,
}

impl PromptContext {
    /// Build a prompt snapshot. `focus` overrides the state's current task.
    pub fn build(
        context: &ProjectContext,
        state: &DevelopmentState,
        limits: &PromptConfig,
        focus: Option<&str>,
    ) -> Self {
        let project_name = context.name();
        let definition = context.definition();
        let project_info = if definition.is_empty() {
            project_name.clone()
        } else {
            format!("{project_name} - {definition}")
        };

        let task = focus
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| state.current_task());

        let completed: Vec<String> = state
            .completed()
            .into_iter()
            .take(limits.completed_limit)
            .collect();
        let next_tasks: Vec<String> = state
            .next_tasks()
            .into_iter()
            .take(limits.next_limit)
            .collect();

        let challenges = state.challenges();
        let challenges = if challenges.is_empty() {
            NO_CHALLENGES.to_string()
        } else {
            challenges.join(", ")
        };

        let decisions = state.decisions();
        let decisions = if decisions.is_empty() {
            NO_DECISIONS.to_string()
        } else {
            let skip = decisions.len().saturating_sub(limits.decisions_limit);
            decisions[skip..].join(", ")
        };

        Self {
            project_name,
            project_info,
            task,
            files: state.focus(FocusField::WorkingFiles),
            integration_points: state.focus(FocusField::IntegrationPoints),
            completion_criteria: state.focus(FocusField::CompletionCriteria),
            phase: context.phase(),
            progress: context.progress(),
            architecture: context.architecture().join(", "),
            principles: context.principles().join(", "),
            completed: completed.join(", "),
            next_tasks: next_tasks.join(", "),
            challenges,
            decisions,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Continue developing {name} focusing on the following task:

## Current Focus
- Task: {task}
- Files: {files}
- Integration points: {integration}
- Completion criteria: {criteria}

## Project Context
- Project: {info}
- Current phase: {phase}
- Progress: {progress}% complete
- Key architecture: {architecture}
- Development principles: {principles}

## Current State
- Completed: {completed}
- Next tasks: {next}
- Challenges: {challenges}
- Recent decisions: {decisions}

{REQUIREMENTS}",
            name = self.project_name,
            task = self.task,
            files = self.files,
            integration = self.integration_points,
            criteria = self.completion_criteria,
            info = self.project_info,
            phase = self.phase,
            progress = self.progress,
            architecture = self.architecture,
            principles = self.principles,
            completed = self.completed,
            next = self.next_tasks,
            challenges = self.challenges,
            decisions = self.decisions,
        )
    }
}
