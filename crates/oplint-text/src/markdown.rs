//! # Markdown Structure Check
//!
//! Lints the markdown structure of a single JSON string value. The rule set
//! is the subset of common markdownlint rules that make sense for strings
//! embedded in JSON documents; rules about file layout (line length,
//! first-line heading, fenced-code language, trailing newline) are
//! deliberately not implemented because they do not apply here.

use std::fmt;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Punctuation that must not end a heading.
const HEADING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!'];

/// A single markdown structure finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownFinding {
    /// Short rule identifier, e.g. `heading-increment`.
    pub rule: &'static str,
    /// Human-readable description of the finding.
    pub message: String,
}

impl fmt::Display for MarkdownFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

/// Lint a markdown text value. An empty result means the text is clean.
pub fn lint(text: &str) -> Vec<MarkdownFinding> {
    let mut findings = Vec::new();
    lint_lines(text, &mut findings);
    lint_events(text, &mut findings);
    findings
}

/// Line-oriented rules: hard tabs, trailing spaces, unclosed code fences.
fn lint_lines(text: &str, findings: &mut Vec<MarkdownFinding>) {
    let mut fences = 0usize;
    for (idx, line) in text.lines().enumerate() {
        let number = idx + 1;
        if line.contains('\t') {
            findings.push(MarkdownFinding {
                rule: "no-hard-tabs",
                message: format!("line {number} contains a hard tab"),
            });
        }
        if line.ends_with(' ') {
            findings.push(MarkdownFinding {
                rule: "no-trailing-spaces",
                message: format!("line {number} has trailing whitespace"),
            });
        }
        if line.trim_start().starts_with("```") {
            fences += 1;
        }
    }
    if fences % 2 != 0 {
        findings.push(MarkdownFinding {
            rule: "fenced-code-closed",
            message: "unclosed fenced code block".to_string(),
        });
    }
}

/// Event-oriented rules: heading increments, heading punctuation, empty
/// link destinations.
fn lint_events(text: &str, findings: &mut Vec<MarkdownFinding>) {
    let mut previous_level = 0usize;
    let mut heading_text: Option<String> = None;

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = level as usize;
                if previous_level > 0 && level > previous_level + 1 {
                    findings.push(MarkdownFinding {
                        rule: "heading-increment",
                        message: format!(
                            "heading level jumps from {previous_level} to {level}"
                        ),
                    });
                }
                previous_level = level;
                heading_text = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = heading_text.take() {
                    let heading = heading.trim_end();
                    if heading.ends_with(HEADING_PUNCTUATION) {
                        findings.push(MarkdownFinding {
                            rule: "no-trailing-punctuation",
                            message: format!("heading '{heading}' ends with punctuation"),
                        });
                    }
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                if dest_url.is_empty() {
                    findings.push(MarkdownFinding {
                        rule: "no-empty-links",
                        message: "link has an empty destination".to_string(),
                    });
                }
            }
            Event::Text(chunk) | Event::Code(chunk) => {
                if let Some(heading) = heading_text.as_mut() {
                    heading.push_str(&chunk);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_has_no_findings() {
        let text = "Computes the sum of two numbers.\n\nSee `add` for details.";
        assert!(lint(text).is_empty());
    }

    #[test]
    fn detects_hard_tab() {
        let findings = lint("Some\ttext");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "no-hard-tabs");
    }

    #[test]
    fn detects_trailing_spaces() {
        let findings = lint("A line with trailing space \nnext line");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "no-trailing-spaces");
    }

    #[test]
    fn detects_unclosed_fence() {
        let findings = lint("Example:\n\n```\nlet x = 1;\n");
        assert!(findings.iter().any(|f| f.rule == "fenced-code-closed"));
    }

    #[test]
    fn closed_fence_is_fine() {
        let findings = lint("Example:\n\n```\nlet x = 1;\n```\n\nDone.");
        assert!(findings.is_empty());
    }

    #[test]
    fn detects_heading_level_jump() {
        let findings = lint("## Section\n\n#### Subsection\n");
        assert!(findings.iter().any(|f| f.rule == "heading-increment"));
    }

    #[test]
    fn incrementing_headings_are_fine() {
        let findings = lint("## Section\n\n### Subsection\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn first_heading_may_start_anywhere() {
        // No first-line-heading rule for JSON strings.
        assert!(lint("### Notes\n\nSome text.").is_empty());
    }

    #[test]
    fn detects_heading_trailing_punctuation() {
        let findings = lint("## Examples:\n\ntext");
        assert!(findings
            .iter()
            .any(|f| f.rule == "no-trailing-punctuation"));
    }

    #[test]
    fn detects_empty_link() {
        let findings = lint("See [the docs]() for details.");
        assert!(findings.iter().any(|f| f.rule == "no-empty-links"));
    }

    #[test]
    fn finding_display_names_the_rule() {
        let findings = lint("Some\ttext");
        let rendered = findings[0].to_string();
        assert!(rendered.starts_with("no-hard-tabs:"));
    }
}
