//! # Recursive Schema Walker
//!
//! Depth-unbounded traversal of an arbitrary JSON value applying two checks
//! at every object level: `title`/`description` strings are spell-checked,
//! and a `format` must equal its sibling `subtype` when format-consistency
//! checking is requested.
//!
//! The traversal uses an explicit worklist, so documents of any nesting
//! depth cannot overflow the stack. The walker is stateless between calls:
//! walking the same tree twice yields the same findings.

use std::collections::VecDeque;

use oplint_text::SpellChecker;
use serde_json::Value;

/// A finding at some location inside a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// JSON-Pointer-style path to the enclosing value, empty for the root.
    pub path: String,
    /// Human-readable description of the finding.
    pub message: String,
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Walk a schema value and collect all findings.
pub fn walk(schema: &Value, check_format: bool, speller: &SpellChecker<'_>) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    let mut worklist: VecDeque<(String, &Value)> = VecDeque::new();
    worklist.push_back((String::new(), schema));

    while let Some((path, node)) = worklist.pop_front() {
        match node {
            Value::Object(map) => {
                for (key, value) in map {
                    let child_path = format!("{path}/{key}");
                    match key.as_str() {
                        "title" | "description" => {
                            if let Some(text) = value.as_str() {
                                for word in speller.check(text) {
                                    issues.push(SchemaIssue {
                                        path: child_path.clone(),
                                        message: format!("misspelled word '{word}'"),
                                    });
                                }
                            }
                        }
                        "format" if check_format => {
                            if map.get("subtype") != Some(value) {
                                issues.push(SchemaIssue {
                                    path: child_path.clone(),
                                    message: format!(
                                        "format {value} has no corresponding subtype"
                                    ),
                                });
                            }
                        }
                        _ => {}
                    }
                    if value.is_object() || value.is_array() {
                        worklist.push_back((child_path, value));
                    }
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if item.is_object() || item.is_array() {
                        worklist.push_back((format!("{path}/{index}"), item));
                    }
                }
            }
            _ => {}
        }
    }

    issues
}
