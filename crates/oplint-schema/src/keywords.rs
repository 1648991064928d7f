//! # Custom Keywords
//!
//! The three openEO schema-vocabulary extensions: `subtype`, `dimensions`,
//! and `parameters`. Each keyword splits its rules in two:
//!
//! - a **meta-schema** describing the shape the keyword's value must have,
//!   compiled once per run and applied when a schema is built;
//! - a **semantic check** run against the enclosing schema object, e.g.
//!   "the subtype's declared base type must match the schema's `type`".
//!
//! All violations are build-time errors; at validation time every keyword
//! accepts any instance.

use jsonschema::paths::LazyLocation;
use jsonschema::{Keyword, ValidationError, Validator};
use serde_json::{json, Map, Value};

use crate::subtypes::SubtypeRegistry;

/// Runtime representation of a compiled keyword: all checks already ran at
/// build time, so instances always pass.
pub(crate) struct CompiledKeyword;

impl Keyword for CompiledKeyword {
    fn validate<'i>(
        &self,
        _instance: &'i Value,
        _location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        Ok(())
    }

    fn is_valid(&self, _instance: &Value) -> bool {
        true
    }
}

/// Meta-schema for `dimensions`: a non-empty ordered list of dimension
/// descriptors. `spatial` dimensions may constrain `axis` to x/y/z,
/// `geometry` dimensions may constrain `geometry_type` to the GeoJSON
/// geometry kinds, and `bands`/`temporal`/`other` carry no extra field.
pub(crate) fn dimensions_meta_schema() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": {
            "type": "object",
            "required": ["type"],
            "oneOf": [
                {
                    "properties": {
                        "type": {
                            "type": "string",
                            "const": "spatial"
                        },
                        "axis": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "string",
                                "enum": ["x", "y", "z"]
                            }
                        }
                    }
                },
                {
                    "properties": {
                        "type": {
                            "type": "string",
                            "const": "geometry"
                        },
                        "geometry_type": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "string",
                                "enum": [
                                    "Point",
                                    "LineString",
                                    "Polygon",
                                    "MultiPoint",
                                    "MultiLineString",
                                    "MultiPolygon"
                                ]
                            }
                        }
                    }
                },
                {
                    "properties": {
                        "type": {
                            "type": "string",
                            "enum": ["bands", "temporal", "other"]
                        }
                    }
                }
            ]
        }
    })
}

/// Meta-schema for `parameters`: an ordered list of parameter descriptors
/// with `name`, `description`, and `schema` (one schema object or a
/// non-empty list of them), plus the optional flags.
pub(crate) fn parameters_meta_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["name", "description", "schema"],
            "properties": {
                "name": {
                    "type": "string",
                    "pattern": "^[A-Za-z0-9_]+$"
                },
                "description": {
                    "type": "string"
                },
                "optional": {
                    "type": "boolean"
                },
                "deprecated": {
                    "type": "boolean"
                },
                "experimental": {
                    "type": "boolean"
                },
                "default": {},
                "schema": {
                    "oneOf": [
                        {
                            "type": "object"
                        },
                        {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "object"
                            }
                        }
                    ]
                }
            }
        }
    })
}

/// Check the keyword's value against its compiled meta-schema.
pub(crate) fn check_meta(meta: &Validator, keyword: &str, value: &Value) -> Result<(), String> {
    if meta.is_valid(value) {
        return Ok(());
    }
    let details: Vec<String> = meta.iter_errors(value).map(|e| e.to_string()).collect();
    Err(format!(
        "invalid '{keyword}' value: {}",
        details.join("; ")
    ))
}

/// Keywords only apply alongside their declared sibling fields.
pub(crate) fn require_siblings(
    parent: &Map<String, Value>,
    keyword: &str,
    siblings: &[&str],
) -> Result<(), String> {
    for sibling in siblings {
        if !parent.contains_key(*sibling) {
            return Err(format!("'{keyword}' is only allowed alongside '{sibling}'"));
        }
    }
    Ok(())
}

/// Semantic rule for `subtype`: the registered base type must equal the
/// enclosing schema's `type`, and deprecated subtypes may be forbidden.
pub(crate) fn check_subtype(
    registry: &SubtypeRegistry,
    parent: &Map<String, Value>,
    name: &str,
    forbid_deprecated: bool,
) -> Result<(), String> {
    if parent.get("type") != registry.base_type(name) {
        let schema_type = parent
            .get("type")
            .map(Value::to_string)
            .unwrap_or_else(|| "null".to_string());
        return Err(format!(
            "Subtype '{name}' not allowed for type {schema_type}."
        ));
    }
    if forbid_deprecated && registry.is_deprecated(name) {
        return Err("Deprecated subtypes not allowed.".to_string());
    }
    Ok(())
}

/// Semantic rule for `dimensions`: only data cubes have dimensions.
pub(crate) fn check_dimensions(parent: &Map<String, Value>) -> Result<(), String> {
    if parent.get("subtype").and_then(Value::as_str) != Some("datacube") {
        return Err("Dimensions only allowed for subtype 'datacube'.".to_string());
    }
    Ok(())
}
