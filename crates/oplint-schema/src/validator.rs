//! # Validator Factory
//!
//! Builds draft-07 validators with full format checking and the three
//! openEO custom keywords registered. Keyword violations (bad shape, subtype
//! base-type mismatch, deprecated subtype, dimensions outside a data cube)
//! are build errors.

use std::sync::Arc;

use jsonschema::paths::Location;
use jsonschema::{Draft, Keyword, ValidationError, ValidationOptions, Validator};
use oplint_text::SpellChecker;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::keywords::{
    check_dimensions, check_meta, check_subtype, dimensions_meta_schema, parameters_meta_schema,
    require_siblings, CompiledKeyword,
};
use crate::subtypes::SubtypeRegistry;
use crate::walker::{self, SchemaIssue};

/// Draft used when a schema does not declare one.
const DEFAULT_SCHEMA_URI: &str = "http://json-schema.org/draft-07/schema#";

/// Error while building a validator.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// A keyword meta-schema failed to compile. Indicates a registry with
    /// definition names the `enum` keyword cannot carry, which real subtype
    /// documents never produce.
    #[error("cannot compile meta-schema for '{keyword}': {reason}")]
    MetaSchema {
        /// Keyword whose meta-schema failed.
        keyword: &'static str,
        /// Reason reported by the schema compiler.
        reason: String,
    },

    /// The schema itself failed to compile, including custom-keyword
    /// violations.
    #[error("schema compilation failed: {reason}")]
    Schema {
        /// Reason reported by the schema compiler.
        reason: String,
    },
}

/// Factory for schema validators configured with the openEO vocabulary.
///
/// Construction compiles the three keyword meta-schemas once; building a
/// validator registers keyword factories that borrow the shared
/// [`SubtypeRegistry`].
#[derive(Debug, Clone)]
pub struct ValidatorFactory {
    registry: Arc<SubtypeRegistry>,
    forbid_deprecated: bool,
    subtype_meta: Arc<Validator>,
    dimensions_meta: Arc<Validator>,
    parameters_meta: Arc<Validator>,
}

impl ValidatorFactory {
    /// Create a factory over the given registry.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::MetaSchema` if a keyword meta-schema cannot be
    /// compiled.
    pub fn new(
        registry: SubtypeRegistry,
        forbid_deprecated: bool,
    ) -> Result<Self, FactoryError> {
        let subtype_meta = compile_meta("subtype", &registry.subtype_meta_schema())?;
        let dimensions_meta = compile_meta("dimensions", &dimensions_meta_schema())?;
        let parameters_meta = compile_meta("parameters", &parameters_meta_schema())?;
        Ok(ValidatorFactory {
            registry: Arc::new(registry),
            forbid_deprecated,
            subtype_meta,
            dimensions_meta,
            parameters_meta,
        })
    }

    /// The registry this factory draws subtype names from.
    pub fn registry(&self) -> &SubtypeRegistry {
        &self.registry
    }

    /// Normalize a schema for compilation: array schemas become an `anyOf`,
    /// and a missing `$schema` defaults to draft-07.
    pub fn prepare(schema: &Value) -> Value {
        let mut prepared = if let Value::Array(alternatives) = schema {
            let mut map = Map::new();
            map.insert("anyOf".to_string(), Value::Array(alternatives.clone()));
            Value::Object(map)
        } else {
            schema.clone()
        };
        if let Value::Object(map) = &mut prepared {
            if !map.contains_key("$schema") {
                map.insert(
                    "$schema".to_string(),
                    Value::String(DEFAULT_SCHEMA_URI.to_string()),
                );
            }
        }
        prepared
    }

    /// Build a validator for an already-prepared schema.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Schema` if compilation fails; custom-keyword
    /// violations surface here.
    pub fn build(&self, schema: &Value) -> Result<Validator, FactoryError> {
        self.options()
            .build(schema)
            .map_err(|e| FactoryError::Schema {
                reason: e.to_string(),
            })
    }

    /// Run the full schema check used by the suites: array schemas must
    /// offer more than one alternative, the prepared schema must compile,
    /// and the walker must find nothing.
    pub fn check_schema(
        &self,
        schema: &Value,
        speller: &SpellChecker<'_>,
        check_format: bool,
    ) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        if let Value::Array(alternatives) = schema {
            if alternatives.len() <= 1 {
                issues.push(SchemaIssue {
                    path: String::new(),
                    message: "array schemas must list more than one alternative".to_string(),
                });
            }
        }
        if let Err(e) = self.build(&Self::prepare(schema)) {
            issues.push(SchemaIssue {
                path: String::new(),
                message: e.to_string(),
            });
            return issues;
        }
        issues.extend(walker::walk(schema, check_format, speller));
        issues
    }

    /// Validation options with the draft, format checking, and the custom
    /// keywords in place.
    fn options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);
        opts.should_validate_formats(true);

        let registry = Arc::clone(&self.registry);
        let meta = Arc::clone(&self.subtype_meta);
        let forbid_deprecated = self.forbid_deprecated;
        opts.with_keyword("subtype", move |parent, value, path| {
            compile_subtype(&registry, &meta, forbid_deprecated, parent, value, path)
        });

        let meta = Arc::clone(&self.dimensions_meta);
        opts.with_keyword("dimensions", move |parent, value, path| {
            compile_dimensions(&meta, parent, value, path)
        });

        let meta = Arc::clone(&self.parameters_meta);
        opts.with_keyword("parameters", move |parent, value, path| {
            compile_parameters(&meta, parent, value, path)
        });

        opts
    }
}

fn compile_meta(
    keyword: &'static str,
    schema: &Value,
) -> Result<Arc<Validator>, FactoryError> {
    Validator::new(schema)
        .map(Arc::new)
        .map_err(|e| FactoryError::MetaSchema {
            keyword,
            reason: e.to_string(),
        })
}

fn keyword_error<'a>(
    path: Location,
    value: &'a Value,
    message: String,
) -> ValidationError<'a> {
    ValidationError::custom(path, Location::new(), value, message)
}

fn compile_subtype<'a>(
    registry: &SubtypeRegistry,
    meta: &Validator,
    forbid_deprecated: bool,
    parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    if let Err(message) = require_siblings(parent, "subtype", &["type"]) {
        return Err(keyword_error(path, value, message));
    }
    if let Err(message) = check_meta(meta, "subtype", value) {
        return Err(keyword_error(path, value, message));
    }
    // Meta-schema guarantees a string from the registry's enum.
    let name = value.as_str().unwrap_or_default();
    if let Err(message) = check_subtype(registry, parent, name, forbid_deprecated) {
        return Err(keyword_error(path, value, message));
    }
    Ok(Box::new(CompiledKeyword))
}

fn compile_dimensions<'a>(
    meta: &Validator,
    parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    if let Err(message) = require_siblings(parent, "dimensions", &["type", "subtype"]) {
        return Err(keyword_error(path, value, message));
    }
    if let Err(message) = check_meta(meta, "dimensions", value) {
        return Err(keyword_error(path, value, message));
    }
    if let Err(message) = check_dimensions(parent) {
        return Err(keyword_error(path, value, message));
    }
    Ok(Box::new(CompiledKeyword))
}

fn compile_parameters<'a>(
    meta: &Validator,
    parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    if let Err(message) = require_siblings(parent, "parameters", &["type", "subtype"]) {
        return Err(keyword_error(path, value, message));
    }
    if let Err(message) = check_meta(meta, "parameters", value) {
        return Err(keyword_error(path, value, message));
    }
    Ok(Box::new(CompiledKeyword))
}
