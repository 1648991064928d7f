//! # Subtype Registry
//!
//! Read-only view over the `definitions` map of a dereferenced
//! subtype-schema document: definition names, declared base types, and
//! deprecation flags. Built once per run and shared with the validator
//! factory, whose `subtype` keyword draws its accepted names from here.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Error while building the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The document is not an object with a `definitions` object.
    #[error("subtype-schema document has no definitions object")]
    MissingDefinitions,
}

/// The dereferenced subtype definitions of a run.
#[derive(Debug, Clone)]
pub struct SubtypeRegistry {
    definitions: Map<String, Value>,
}

impl SubtypeRegistry {
    /// Build a registry from a dereferenced subtype-schema document.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::MissingDefinitions` if the document does not
    /// carry a `definitions` object.
    pub fn from_document(document: &Value) -> Result<Self, RegistryError> {
        let definitions = document
            .get("definitions")
            .and_then(Value::as_object)
            .ok_or(RegistryError::MissingDefinitions)?;
        Ok(SubtypeRegistry {
            definitions: definitions.clone(),
        })
    }

    /// All definition names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Look up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.definitions.get(name)
    }

    /// Iterate over all `(name, definition)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.definitions.iter()
    }

    /// The declared base `type` of a subtype definition.
    pub fn base_type(&self, name: &str) -> Option<&Value> {
        self.definitions.get(name).and_then(|d| d.get("type"))
    }

    /// Whether a subtype definition is flagged deprecated.
    pub fn is_deprecated(&self, name: &str) -> bool {
        self.definitions
            .get(name)
            .and_then(|d| d.get("deprecated"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Meta-schema for the `subtype` keyword: a string drawn from the set of
    /// known definition names.
    pub fn subtype_meta_schema(&self) -> Value {
        json!({
            "type": "string",
            "enum": self.names()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> SubtypeRegistry {
        let document = json!({
            "definitions": {
                "date": {"type": "string", "subtype": "date", "title": "Date"},
                "datacube": {"type": "object", "subtype": "datacube", "title": "Data Cube"},
                "output-format": {
                    "type": "string",
                    "subtype": "output-format",
                    "deprecated": true
                }
            }
        });
        SubtypeRegistry::from_document(&document).unwrap()
    }

    #[test]
    fn names_are_sorted() {
        assert_eq!(registry().names(), vec!["datacube", "date", "output-format"]);
    }

    #[test]
    fn base_type_lookup() {
        let registry = registry();
        assert_eq!(registry.base_type("date"), Some(&json!("string")));
        assert_eq!(registry.base_type("datacube"), Some(&json!("object")));
        assert_eq!(registry.base_type("unknown"), None);
    }

    #[test]
    fn deprecation_flag() {
        let registry = registry();
        assert!(registry.is_deprecated("output-format"));
        assert!(!registry.is_deprecated("date"));
        assert!(!registry.is_deprecated("unknown"));
    }

    #[test]
    fn meta_schema_enumerates_names() {
        let meta = registry().subtype_meta_schema();
        assert_eq!(meta["type"], "string");
        assert_eq!(meta["enum"], json!(["datacube", "date", "output-format"]));
    }

    #[test]
    fn missing_definitions_is_an_error() {
        let err = SubtypeRegistry::from_document(&json!({})).unwrap_err();
        assert!(matches!(err, RegistryError::MissingDefinitions));
    }
}
