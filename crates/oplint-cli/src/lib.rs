//! # oplint-cli — openEO Process Linter
//!
//! Drives the check suites over openEO process and subtype-schema documents
//! and aggregates their findings:
//!
//! - [`subtypes`] — structural and text checks on every subtype definition
//! - [`process`] — checks on every process definition file
//! - [`report`] — finding type and result reporting
//!
//! ## Crate Policy
//!
//! - The run configuration is loaded once in `main` and passed by reference.
//! - Suites never abort on the first finding; all findings for all subjects
//!   are collected and reported together.

pub mod process;
pub mod report;
pub mod subtypes;

use anyhow::Context;
use oplint_core::{Config, Dictionary};
use oplint_schema::{deref, SubtypeRegistry, ValidatorFactory};
use oplint_text::SpellChecker;

use crate::report::Finding;

/// Execute the configured suites and report the findings.
///
/// Returns the process exit code: 0 when every check passed, 1 otherwise.
pub fn run(config: &Config) -> anyhow::Result<u8> {
    let mut dictionary = Dictionary::base();
    dictionary.add_words(config.ignored_words()?);
    let speller = SpellChecker::new(&dictionary);

    let document = oplint_schema::fetch_json(&config.subtype_schemas)
        .context("cannot resolve the subtype-schema document")?;
    let document = deref::dereference(&document);
    let registry = SubtypeRegistry::from_document(&document)?;
    tracing::debug!(subtypes = registry.len(), "subtype registry loaded");

    let factory = ValidatorFactory::new(registry, config.forbid_deprecated_types)?;

    // The link check needs a non-empty identifier list; without process
    // files there is nothing to resolve references against.
    let known_ids = config
        .check_process_links
        .then(|| process::process_ids(std::path::Path::new(&config.processes)))
        .filter(|ids| !ids.is_empty());

    let mut findings: Vec<Finding> = Vec::new();
    if config.check_subtype_schemas {
        findings.extend(subtypes::check_definitions(
            factory.registry(),
            &speller,
            known_ids.as_deref(),
        ));
    }
    findings.extend(process::check_processes(config, &factory, &speller));

    report::print(&findings);
    Ok(u8::from(!findings.is_empty()))
}
