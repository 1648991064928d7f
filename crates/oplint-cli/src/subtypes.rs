//! # Subtype-Schema Suite
//!
//! Structural and text checks on every entry of the dereferenced
//! subtype-schema document's `definitions` map. Every definition must carry
//! a base `type`, a `subtype` name, a short title, and a description longer
//! than a title; titles and descriptions must pass the text checks.

use oplint_schema::SubtypeRegistry;
use oplint_text::{links, markdown, SpellChecker};
use serde_json::Value;

use crate::report::Finding;

/// Maximum title length (exclusive), shared with the process suite.
pub(crate) const TITLE_MAX: usize = 60;

/// Minimum description length (exclusive) for subtype definitions.
const DESCRIPTION_MIN: usize = 60;

/// Check every subtype definition and collect the findings. When
/// `known_ids` is supplied, descriptions are also checked for references to
/// unknown processes.
pub fn check_definitions(
    registry: &SubtypeRegistry,
    speller: &SpellChecker<'_>,
    known_ids: Option<&[String]>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, schema) in registry.iter() {
        tracing::info!(definition = %name, "checking subtype definition");
        check_definition(name, schema, speller, known_ids, &mut findings);
    }
    findings
}

fn check_definition(
    name: &str,
    schema: &Value,
    speller: &SpellChecker<'_>,
    known_ids: Option<&[String]>,
    findings: &mut Vec<Finding>,
) {
    let fail = |findings: &mut Vec<Finding>, message: String| {
        findings.push(Finding::new("subtypes", name, message));
    };

    let Some(schema) = schema.as_object() else {
        fail(findings, "definition must be an object".to_string());
        return;
    };

    if !has_valid_type(schema.get("type")) {
        fail(
            findings,
            "type must be a string or a non-empty array of strings".to_string(),
        );
    }

    if !schema.get("subtype").is_some_and(Value::is_string) {
        fail(findings, "subtype must be a string".to_string());
    }

    match schema.get("title").and_then(Value::as_str) {
        Some(title) => {
            check_title("subtypes", name, title, speller, findings);
        }
        None => fail(findings, "title must be a string".to_string()),
    }

    match schema.get("description").and_then(Value::as_str) {
        Some(description) => {
            if description.chars().count() <= DESCRIPTION_MIN {
                fail(
                    findings,
                    format!(
                        "description must be longer than {DESCRIPTION_MIN} characters"
                    ),
                );
            }
            check_description("subtypes", name, description, speller, findings);
            if let Some(known_ids) = known_ids {
                for unknown in links::check(description, known_ids) {
                    fail(
                        findings,
                        format!("reference to unknown process '{unknown}'"),
                    );
                }
            }
        }
        None => fail(findings, "description must be a string".to_string()),
    }
}

/// `type` is a string or a non-empty array of strings.
fn has_valid_type(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(_)) => true,
        Some(Value::Array(items)) => {
            !items.is_empty() && items.iter().all(Value::is_string)
        }
        _ => false,
    }
}

/// Title rules shared by subtype definitions and process summaries: short,
/// no trailing dot, correctly spelled.
pub(crate) fn check_title(
    suite: &'static str,
    name: &str,
    title: &str,
    speller: &SpellChecker<'_>,
    findings: &mut Vec<Finding>,
) {
    if title.is_empty() {
        findings.push(Finding::new(suite, name, "title must not be empty"));
        return;
    }
    if title.chars().count() >= TITLE_MAX {
        findings.push(Finding::new(
            suite,
            name,
            format!("title must be shorter than {TITLE_MAX} characters"),
        ));
    }
    if title.ends_with('.') {
        findings.push(Finding::new(suite, name, "title must not end with a dot"));
    }
    if let Some(message) = speller.check_entity(title, Some(name)) {
        findings.push(Finding::new(suite, name, message));
    }
}

/// Description rules shared by both suites: clean markdown structure and
/// correct spelling. Process-link checks are applied separately by each
/// suite since they need the identifier list.
pub(crate) fn check_description(
    suite: &'static str,
    name: &str,
    description: &str,
    speller: &SpellChecker<'_>,
    findings: &mut Vec<Finding>,
) {
    for finding in markdown::lint(description) {
        findings.push(Finding::new(suite, name, finding.to_string()));
    }
    if let Some(message) = speller.check_entity(description, Some(name)) {
        findings.push(Finding::new(suite, name, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oplint_core::Dictionary;
    use serde_json::json;

    fn check(document: Value) -> Vec<Finding> {
        let registry = SubtypeRegistry::from_document(&document).unwrap();
        let dictionary = Dictionary::base();
        let speller = SpellChecker::new(&dictionary);
        check_definitions(&registry, &speller, None)
    }

    fn valid_definition() -> Value {
        json!({
            "type": "string",
            "subtype": "date",
            "title": "Date only",
            "description": "A date without a time component, given in the format described by the specification."
        })
    }

    #[test]
    fn valid_definition_passes() {
        let findings = check(json!({"definitions": {"date": valid_definition()}}));
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn array_type_is_accepted() {
        let mut definition = valid_definition();
        definition["type"] = json!(["string", "null"]);
        let findings = check(json!({"definitions": {"date": definition}}));
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn empty_array_type_is_rejected() {
        let mut definition = valid_definition();
        definition["type"] = json!([]);
        let findings = check(json!({"definitions": {"date": definition}}));
        assert!(findings.iter().any(|f| f.message.contains("type must be")));
    }

    #[test]
    fn missing_subtype_is_rejected() {
        let mut definition = valid_definition();
        definition.as_object_mut().unwrap().remove("subtype");
        let findings = check(json!({"definitions": {"date": definition}}));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("subtype must be a string")));
    }

    #[test]
    fn long_title_is_rejected_and_names_the_definition() {
        let mut definition = valid_definition();
        definition["title"] = json!("t".repeat(70));
        let findings = check(json!({"definitions": {"date": definition}}));
        let finding = findings
            .iter()
            .find(|f| f.message.contains("shorter than 60"))
            .expect("length finding");
        assert_eq!(finding.subject, "date");
    }

    #[test]
    fn title_with_trailing_dot_is_rejected() {
        let mut definition = valid_definition();
        definition["title"] = json!("Date only.");
        let findings = check(json!({"definitions": {"date": definition}}));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("must not end with a dot")));
    }

    #[test]
    fn short_description_is_rejected() {
        let mut definition = valid_definition();
        definition["description"] = json!("Too short.");
        let findings = check(json!({"definitions": {"date": definition}}));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("longer than 60")));
    }

    #[test]
    fn misspelled_description_is_reported() {
        let mut definition = valid_definition();
        definition["description"] = json!(
            "A dqte without a time component, given in the format described by the specification."
        );
        let findings = check(json!({"definitions": {"date": definition}}));
        assert!(findings.iter().any(|f| f.message.contains("dqte")));
    }

    #[test]
    fn non_object_definition_is_rejected() {
        let findings = check(json!({"definitions": {"broken": "nope"}}));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("must be an object"));
    }

    #[test]
    fn unknown_process_reference_is_reported_with_known_ids() {
        let mut definition = valid_definition();
        definition["description"] = json!(
            "A date without a time component, produced for example by ``multiply()``."
        );
        let document = json!({"definitions": {"date": definition}});
        let registry = SubtypeRegistry::from_document(&document).unwrap();
        let dictionary = Dictionary::base();
        let speller = SpellChecker::new(&dictionary);
        let known = vec!["add".to_string()];
        let findings = check_definitions(&registry, &speller, Some(&known));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("unknown process 'multiply'")));
    }

    #[test]
    fn all_definitions_are_checked() {
        let mut bad = valid_definition();
        bad["title"] = json!("Bad title.");
        let findings = check(json!({
            "definitions": {
                "date": valid_definition(),
                "worse": bad
            }
        }));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subject, "worse");
    }
}
