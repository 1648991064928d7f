//! # Spell Check
//!
//! Checks the prose portions of a markdown text value against the run's
//! accepted-word dictionary. Inline code, code blocks, and link destinations
//! are not prose and are skipped. The check is tolerant of acronyms
//! (all-uppercase tokens) and of tokens containing digits, and lookups
//! ignore case.

use oplint_core::Dictionary;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Spell checker borrowing the run's dictionary.
#[derive(Debug, Clone, Copy)]
pub struct SpellChecker<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> SpellChecker<'a> {
    /// Create a checker over the given dictionary.
    pub fn new(dictionary: &'a Dictionary) -> Self {
        SpellChecker { dictionary }
    }

    /// Check a text value and return the misspelled words in order of
    /// appearance. An empty text is considered clean.
    pub fn check(&self, text: &str) -> Vec<String> {
        let mut misspelled = Vec::new();
        for segment in prose_segments(text) {
            for token in tokens(&segment) {
                if !self.accepts(&token) {
                    misspelled.push(token);
                }
            }
        }
        misspelled
    }

    /// Check a text value owned by a named entity and render the failure
    /// message naming the word list and the owner, if any.
    pub fn check_entity(&self, text: &str, id: Option<&str>) -> Option<String> {
        let misspelled = self.check(text);
        if misspelled.is_empty() {
            return None;
        }
        let mut message = String::from("Misspelled word");
        if misspelled.len() > 1 {
            message.push('s');
        }
        if let Some(id) = id {
            message.push_str(" in ");
            message.push_str(id);
        }
        message.push_str(": ");
        message.push_str(&misspelled.join(", "));
        Some(message)
    }

    /// Token acceptance: single letters, acronyms, and tokens containing
    /// digits always pass; everything else must be in the dictionary.
    fn accepts(&self, token: &str) -> bool {
        if token.chars().count() <= 1 {
            return true;
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            return true;
        }
        if token.chars().all(|c| !c.is_lowercase()) {
            return true;
        }
        self.dictionary.contains(token)
    }
}

/// Extract the prose segments of a markdown text: `Text` events outside of
/// code blocks. `Code` events (inline code) and code block contents never
/// reach the spell check.
fn prose_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut in_code_block = false;
    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(chunk) if !in_code_block => segments.push(chunk.to_string()),
            _ => {}
        }
    }
    segments
}

/// Split a prose segment into word tokens. A token is a run of alphanumeric
/// characters and apostrophes; a trailing possessive `'s` is dropped before
/// lookup.
fn tokens(segment: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    for c in segment.chars() {
        if c.is_alphanumeric() || c == '\'' {
            current.push(c);
        } else if !current.is_empty() {
            push_token(&mut result, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut result, current);
    }
    result
}

fn push_token(result: &mut Vec<String>, token: String) {
    let token = token.trim_matches('\'');
    let token = token.strip_suffix("'s").unwrap_or(token);
    if !token.is_empty() {
        result.push(token.to_string());
    }
}
