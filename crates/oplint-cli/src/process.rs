//! # Process Suite
//!
//! Checks every `*.json` process definition in the configured directory:
//! the `id` must match the file stem and the process-name pattern, the
//! `summary` follows the title rules, the `description` passes the text
//! checks, and every parameter and return schema must compile through the
//! validator factory and survive the schema walk.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use oplint_schema::ValidatorFactory;
use oplint_text::{links, SpellChecker};
use regex::Regex;
use serde_json::Value;

use crate::report::Finding;
use crate::subtypes::{check_description, check_title};

static PROCESS_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("process id pattern"));

/// Check every process definition file and collect the findings.
///
/// A missing processes directory is not an error; repositories without
/// process files simply skip the suite.
pub fn check_processes(
    config: &oplint_core::Config,
    factory: &ValidatorFactory,
    speller: &SpellChecker<'_>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let dir = Path::new(&config.processes);
    let files = match process_files(dir) {
        Some(files) => files,
        None => {
            tracing::warn!(directory = %dir.display(), "processes directory not found, skipping");
            return findings;
        }
    };

    // The link check accepts every id found in the directory, so a process
    // may reference a sibling regardless of check order.
    let known_ids: Vec<String> = files
        .iter()
        .filter_map(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect();
    let known_ids = config
        .check_process_links
        .then_some(known_ids.as_slice())
        .filter(|ids| !ids.is_empty());

    for path in &files {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(process = %name, "checking process definition");
        match read_process(path) {
            Ok(process) => {
                check_process(&name, &process, factory, speller, known_ids, &mut findings);
            }
            Err(message) => findings.push(Finding::new("processes", name, message)),
        }
    }
    findings
}

/// The process identifiers a repository defines, taken from the file stems
/// of the configured processes directory.
pub(crate) fn process_ids(dir: &Path) -> Vec<String> {
    process_files(dir)
        .unwrap_or_default()
        .iter()
        .filter_map(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect()
}

/// All `*.json` files of the directory, sorted by name for stable output.
fn process_files(dir: &Path) -> Option<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == "json")
        })
        .collect();
    files.sort();
    Some(files)
}

fn read_process(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read process file: {e}"))?;
    serde_json::from_str(&content).map_err(|e| format!("process file is not valid JSON: {e}"))
}

fn check_process(
    name: &str,
    process: &Value,
    factory: &ValidatorFactory,
    speller: &SpellChecker<'_>,
    known_ids: Option<&[String]>,
    findings: &mut Vec<Finding>,
) {
    let fail = |findings: &mut Vec<Finding>, message: String| {
        findings.push(Finding::new("processes", name, message));
    };

    let Some(process) = process.as_object() else {
        fail(findings, "process definition must be an object".to_string());
        return;
    };

    match process.get("id").and_then(Value::as_str) {
        Some(id) => {
            if id != name {
                fail(findings, format!("id '{id}' does not match the file name"));
            }
            if !PROCESS_ID.is_match(id) {
                fail(
                    findings,
                    format!("id '{id}' must only contain letters, numbers and underscores"),
                );
            }
        }
        None => fail(findings, "id must be a string".to_string()),
    }

    match process.get("summary").and_then(Value::as_str) {
        Some(summary) => check_title("processes", name, summary, speller, findings),
        None => fail(findings, "summary must be a string".to_string()),
    }

    match process.get("description").and_then(Value::as_str) {
        Some(description) => {
            check_description("processes", name, description, speller, findings);
            check_links(name, description, known_ids, findings);
        }
        None => fail(findings, "description must be a string".to_string()),
    }

    match process.get("parameters") {
        Some(Value::Array(parameters)) => {
            for (index, parameter) in parameters.iter().enumerate() {
                check_parameter(name, index, parameter, factory, speller, known_ids, findings);
            }
        }
        _ => fail(findings, "parameters must be an array".to_string()),
    }

    match process.get("returns").and_then(Value::as_object) {
        Some(returns) => {
            if let Some(description) = returns.get("description").and_then(Value::as_str) {
                check_description("processes", name, description, speller, findings);
                check_links(name, description, known_ids, findings);
            }
            match returns.get("schema") {
                Some(schema) => {
                    check_schema(name, "returns", schema, factory, speller, findings);
                }
                None => fail(findings, "returns must have a schema".to_string()),
            }
        }
        None => fail(findings, "returns must be an object".to_string()),
    }
}

fn check_parameter(
    name: &str,
    index: usize,
    parameter: &Value,
    factory: &ValidatorFactory,
    speller: &SpellChecker<'_>,
    known_ids: Option<&[String]>,
    findings: &mut Vec<Finding>,
) {
    let fail = |findings: &mut Vec<Finding>, message: String| {
        findings.push(Finding::new("processes", name, message));
    };

    let Some(parameter) = parameter.as_object() else {
        fail(findings, format!("parameter {index} must be an object"));
        return;
    };

    let label = match parameter.get("name").and_then(Value::as_str) {
        Some(param_name) => {
            if !PROCESS_ID.is_match(param_name) {
                fail(
                    findings,
                    format!(
                        "parameter name '{param_name}' must only contain letters, numbers and underscores"
                    ),
                );
            }
            param_name.to_string()
        }
        None => {
            fail(findings, format!("parameter {index} must have a name"));
            index.to_string()
        }
    };

    match parameter.get("description").and_then(Value::as_str) {
        Some(description) => {
            check_description("processes", name, description, speller, findings);
            check_links(name, description, known_ids, findings);
        }
        None => fail(
            findings,
            format!("parameter '{label}' must have a description"),
        ),
    }

    match parameter.get("schema") {
        Some(schema) => {
            let subject = format!("parameter '{label}'");
            check_schema(name, &subject, schema, factory, speller, findings);
        }
        None => fail(findings, format!("parameter '{label}' must have a schema")),
    }
}

fn check_schema(
    name: &str,
    subject: &str,
    schema: &Value,
    factory: &ValidatorFactory,
    speller: &SpellChecker<'_>,
    findings: &mut Vec<Finding>,
) {
    for issue in factory.check_schema(schema, speller, true) {
        findings.push(Finding::new(
            "processes",
            name,
            format!("{subject}: {issue}"),
        ));
    }
}

fn check_links(
    name: &str,
    text: &str,
    known_ids: Option<&[String]>,
    findings: &mut Vec<Finding>,
) {
    let Some(known_ids) = known_ids else {
        return;
    };
    for unknown in links::check(text, known_ids) {
        findings.push(Finding::new(
            "processes",
            name,
            format!("reference to unknown process '{unknown}'"),
        ));
    }
}
