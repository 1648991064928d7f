//! # Process Cross-Reference Check
//!
//! openEO descriptions reference other processes as ``` ``name()`` ``` — a
//! double-backtick-wrapped function call. Every referenced name must be a
//! known process identifier. The check is only meaningful when the caller
//! has the full identifier list, so the caller gates it on the
//! `checkProcessLinks` option.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a double-backtick process reference. Boundary conditions (no
/// adjacent word characters or backticks) are verified separately since the
/// regex crate has no look-around.
static PROCESS_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"``(\w+)\(\)``").expect("process reference pattern"));

/// Scan a text for process references and return the referenced names that
/// are not in `known`, in order of appearance.
pub fn check(text: &str, known: &[String]) -> Vec<String> {
    let mut unknown = Vec::new();
    for captures in PROCESS_REF.captures_iter(text) {
        let whole = captures.get(0).expect("match");
        if !standalone(text, whole.start(), whole.end()) {
            continue;
        }
        let name = &captures[1];
        if !known.iter().any(|id| id == name) {
            unknown.push(name.to_string());
        }
    }
    unknown
}

/// A reference only counts when it is not embedded in a longer word or a
/// longer backtick run.
fn standalone(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric() && c != '_' && c != '`');
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric() && c != '_' && c != '`');
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        vec!["add".to_string(), "subtract".to_string()]
    }

    #[test]
    fn known_reference_passes() {
        assert!(check("Uses ``add()`` internally.", &known()).is_empty());
    }

    #[test]
    fn unknown_reference_fails() {
        assert_eq!(
            check("Uses ``multiply()`` internally.", &known()),
            vec!["multiply"]
        );
    }

    #[test]
    fn multiple_references() {
        let text = "Combines ``add()`` and ``subtract()`` with ``divide()``.";
        assert_eq!(check(text, &known()), vec!["divide"]);
    }

    #[test]
    fn reference_at_text_boundaries() {
        assert!(check("``add()``", &known()).is_empty());
        assert_eq!(check("``pow()``", &known()), vec!["pow"]);
    }

    #[test]
    fn embedded_in_longer_backtick_run_is_ignored() {
        // Triple backticks are code fences, not references.
        assert!(check("```add()``", &known()).is_empty());
    }

    #[test]
    fn adjacent_word_character_is_ignored() {
        assert!(check("x``add()``", &known()).is_empty());
    }

    #[test]
    fn plain_code_spans_are_not_references() {
        assert!(check("Set `mode` to `add` first.", &known()).is_empty());
    }

    #[test]
    fn no_known_ids_flags_everything() {
        assert_eq!(check("``add()``", &[]), vec!["add"]);
    }
}
