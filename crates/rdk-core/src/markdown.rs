//! Loss-free section view over the markdown documents the devkit manages.
//!
//! Documents are split on level-two headings (`## Title`). Lines before the
//! first heading form the preamble. Rendering a parsed [`Document`] returns
//! the parsed text byte for byte, so edits only touch the lines they target
//! and anything a human wrote by hand survives.

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A level-two heading and the lines that follow it, up to the next
/// level-two heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text after `## `, exactly as written.
    pub heading: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    /// Heading with trailing whitespace removed.
    pub fn title(&self) -> &str {
        self.heading.trim_end()
    }

    /// `true` when the heading is `prefix` or `prefix: <value>`.
    pub fn matches(&self, prefix: &str) -> bool {
        let title = self.title();
        title == prefix
            || title
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'))
    }

    /// The part of the heading after the first `:`, for headings such as
    /// `Current Phase: 2/3 - Feature Development`.
    pub fn heading_value(&self) -> Option<&str> {
        self.title()
            .split_once(':')
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Section text with surrounding blank lines removed.
    pub fn body(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }

    /// Text of every top-level `- ` bullet. Indented sub-bullets are skipped.
    pub fn bullets(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| line.strip_prefix("- "))
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Text of every unindented `N. item` line, numbering stripped.
    pub fn numbered(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| strip_numbering(line))
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Value of the first `- KEY: value` line.
    pub fn field(&self, key: &str) -> Option<String> {
        self.lines
            .iter()
            .find_map(|line| field_value(line, key))
            .map(|value| value.trim().to_string())
    }

    /// Rewrite the value of an existing `- KEY: value` line, keeping its
    /// indentation. Returns `false` when no such line exists.
    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        let Some(idx) = self
            .lines
            .iter()
            .position(|line| field_value(line, key).is_some())
        else {
            return false;
        };
        let line = &self.lines[idx];
        let indent = &line[..line.len() - line.trim_start().len()];
        let updated = format!("{indent}- {key}: {value}");
        self.lines[idx] = updated;
        true
    }

    /// Insert a top-level bullet before the first non-blank line.
    pub fn push_front_bullet(&mut self, text: &str) {
        let at = self
            .lines
            .iter()
            .position(|line| !line.trim().is_empty())
            .unwrap_or(0);
        self.lines.insert(at, format!("- {text}"));
    }

    /// Insert a top-level bullet after the last non-blank line.
    pub fn push_bullet(&mut self, text: &str) {
        self.push_lines([format!("- {text}")]);
    }

    /// Insert raw lines after the last non-blank line, so the blank line
    /// separating this section from the next one stays in place.
    pub fn push_lines(&mut self, new_lines: impl IntoIterator<Item = String>) {
        let mut at = self.content_end();
        for line in new_lines {
            self.lines.insert(at, line);
            at += 1;
        }
    }

    /// Drop every top-level bullet whose text is exactly `text`. Returns
    /// whether anything was removed.
    pub fn remove_bullet(&mut self, text: &str) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.strip_prefix("- ").map(str::trim) != Some(text));
        self.lines.len() != before
    }

    fn content_end(&self) -> usize {
        self.lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |idx| idx + 1)
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A markdown document split into a preamble and level-two sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    preamble: Vec<String>,
    sections: Vec<Section>,
    trailing_newline: bool,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);

        let mut doc = Document {
            trailing_newline,
            ..Default::default()
        };
        if text.is_empty() {
            return doc;
        }

        for line in body.split('\n') {
            if let Some(heading) = line.strip_prefix("## ") {
                doc.sections.push(Section::new(heading));
            } else if let Some(section) = doc.sections.last_mut() {
                section.lines.push(line.to_string());
            } else {
                doc.preamble.push(line.to_string());
            }
        }
        doc
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self.preamble.clone();
        for section in &self.sections {
            lines.push(format!("## {}", section.heading));
            lines.extend(section.lines.iter().cloned());
        }
        let mut out = lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Text of the first `# ` heading in the preamble.
    pub fn title(&self) -> Option<&str> {
        self.preamble
            .iter()
            .find_map(|line| line.strip_prefix("# "))
            .map(str::trim)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    /// First section whose heading is `prefix` or `prefix: ...`.
    pub fn section(&self, prefix: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.matches(prefix))
    }

    pub fn section_mut(&mut self, prefix: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.matches(prefix))
    }

    /// Rename the first section matching `prefix`.
    pub fn set_heading(&mut self, prefix: &str, heading: &str) -> bool {
        match self.section_mut(prefix) {
            Some(section) => {
                section.heading = heading.to_string();
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The part of a bullet before its first `:`.
///
/// `Modularity: small crates` becomes `Modularity`.
pub fn label(item: &str) -> String {
    item.split(':').next().unwrap_or(item).trim().to_string()
}

fn strip_numbering(line: &str) -> Option<String> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim().to_string())
}

fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim_start()
        .strip_prefix("- ")?
        .strip_prefix(key)?
        .strip_prefix(':')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Development State\n\n## High Priority\n- CURRENT TASK: Wire the parser\n  - COMPLETION CRITERIA: Tests pass\n\n## Next Tasks\n1. Add lexer\n   - Files: lexer.rs\n2. Add parser\n10. Ship it\n\n## Decisions\n- Use serde: widely known\n  - Rationale: ecosystem\n- Keep docs in markdown\n";

    #[test]
    fn render_reproduces_input() {
        for text in [
            SAMPLE,
            "",
            "\n",
            "no headings at all",
            "## Only heading",
            "## Trailing spaces   \r\nbody\r\n",
            "# Title\n\n\n## A\n\n\n## B\n\n",
        ] {
            assert_eq!(Document::parse(text).render(), text);
        }
    }

    #[test]
    fn level_three_headings_stay_in_section() {
        let doc = Document::parse("## A\n### Nested\ntext\n");
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].lines, vec!["### Nested", "text"]);
    }

    #[test]
    fn section_lookup_matches_prefix_with_colon() {
        let doc = Document::parse("## Current Phase: 2/3 - Build\nProgress: 10%\n## Currently\n");
        let phase = doc.section("Current Phase").unwrap();
        assert_eq!(phase.heading_value(), Some("2/3 - Build"));
        assert!(doc.section("Current").is_none());
        assert!(doc.section("Currently").is_some());
    }

    #[test]
    fn title_reads_preamble_heading() {
        let doc = Document::parse(SAMPLE);
        assert_eq!(doc.title(), Some("Development State"));
    }

    #[test]
    fn bullets_skip_nested_items() {
        let doc = Document::parse(SAMPLE);
        let decisions = doc.section("Decisions").unwrap();
        assert_eq!(
            decisions.bullets(),
            vec!["Use serde: widely known", "Keep docs in markdown"]
        );
    }

    #[test]
    fn numbered_items_strip_numbering() {
        let doc = Document::parse(SAMPLE);
        let next = doc.section("Next Tasks").unwrap();
        assert_eq!(next.numbered(), vec!["Add lexer", "Add parser", "Ship it"]);
    }

    #[test]
    fn numbered_requires_space_after_dot() {
        assert_eq!(strip_numbering("1.5 liters"), None);
        assert_eq!(strip_numbering("  1. indented"), None);
        assert_eq!(strip_numbering("3. ok"), Some("ok".to_string()));
    }

    #[test]
    fn field_reads_indented_lines() {
        let doc = Document::parse(SAMPLE);
        let high = doc.section("High Priority").unwrap();
        assert_eq!(high.field("CURRENT TASK").as_deref(), Some("Wire the parser"));
        assert_eq!(high.field("COMPLETION CRITERIA").as_deref(), Some("Tests pass"));
        assert_eq!(high.field("WORKING FILES"), None);
    }

    #[test]
    fn field_keeps_hyphenated_values() {
        let doc = Document::parse("## High Priority\n- CURRENT TASK: Add JSON-RPC - phase two\n");
        let high = doc.section("High Priority").unwrap();
        assert_eq!(
            high.field("CURRENT TASK").as_deref(),
            Some("Add JSON-RPC - phase two")
        );
    }

    #[test]
    fn set_field_preserves_indentation() {
        let mut doc = Document::parse(SAMPLE);
        let high = doc.section_mut("High Priority").unwrap();
        assert!(high.set_field("COMPLETION CRITERIA", "Benchmarks green"));
        assert!(!high.set_field("WORKING FILES", "x"));
        assert!(doc
            .render()
            .contains("\n  - COMPLETION CRITERIA: Benchmarks green\n"));
    }

    #[test]
    fn push_front_bullet_skips_leading_blank_lines() {
        let mut doc = Document::parse("## Completed\n\n- Old\n\n## Next\n");
        doc.section_mut("Completed").unwrap().push_front_bullet("New");
        assert_eq!(doc.render(), "## Completed\n\n- New\n- Old\n\n## Next\n");
    }

    #[test]
    fn push_bullet_lands_before_trailing_blank_lines() {
        let mut doc = Document::parse("## Challenges\n- One\n\n## Decisions\n");
        doc.section_mut("Challenges").unwrap().push_bullet("Two");
        assert_eq!(doc.render(), "## Challenges\n- One\n- Two\n\n## Decisions\n");
    }

    #[test]
    fn remove_bullet_leaves_other_lines() {
        let mut doc =
            Document::parse("## Challenges\n- None yet\n- Flaky CI\n  - None yet\n\n## Decisions\n");
        let challenges = doc.section_mut("Challenges").unwrap();
        assert!(challenges.remove_bullet("None yet"));
        assert!(!challenges.remove_bullet("None yet"));
        assert_eq!(
            doc.render(),
            "## Challenges\n- Flaky CI\n  - None yet\n\n## Decisions\n"
        );
    }

    #[test]
    fn set_heading_renames_section() {
        let mut doc = Document::parse("## Current Phase: 1/3 - Init\n");
        assert!(doc.set_heading("Current Phase", "Current Phase: 2/3 - Build"));
        assert!(!doc.set_heading("Missing", "x"));
        assert_eq!(doc.render(), "## Current Phase: 2/3 - Build\n");
    }

    #[test]
    fn label_takes_text_before_colon() {
        assert_eq!(label("Modularity: small crates"), "Modularity");
        assert_eq!(label("Testability"), "Testability");
    }
}
