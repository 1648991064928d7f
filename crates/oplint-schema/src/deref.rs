//! # `$ref` Dereferencer
//!
//! Expands local `$ref` pointers (`#/...`) into an inline tree. Cycle safety
//! is an explicit invariant here: the resolution path is tracked, and a
//! `$ref` whose target is already being expanded is left unresolved in
//! place. Non-local references are also left in place — the subtype-schema
//! document only uses local pointers.
//!
//! A document without any `$ref` nodes dereferences to a structurally
//! identical tree.

use serde_json::{Map, Value};

/// Dereference all local `$ref` pointers in `document`.
pub fn dereference(document: &Value) -> Value {
    let mut resolving = Vec::new();
    expand(document, document, &mut resolving)
}

fn expand(node: &Value, root: &Value, resolving: &mut Vec<String>) -> Value {
    match node {
        Value::Object(map) => {
            if let Some(target) = local_ref(map) {
                if resolving.iter().any(|p| p == &target) {
                    // Circular reference: leave the $ref node unresolved.
                    tracing::debug!(pointer = target, "circular $ref left in place");
                    return node.clone();
                }
                return match root.pointer(&target) {
                    Some(resolved) => {
                        resolving.push(target);
                        let expanded = expand(resolved, root, resolving);
                        resolving.pop();
                        expanded
                    }
                    None => {
                        tracing::warn!(pointer = target, "unresolvable $ref left in place");
                        node.clone()
                    }
                };
            }
            let mut expanded = Map::with_capacity(map.len());
            for (key, value) in map {
                expanded.insert(key.clone(), expand(value, root, resolving));
            }
            Value::Object(expanded)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| expand(item, root, resolving))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Extract the JSON-Pointer part of a local `$ref`, if this object is one.
fn local_ref(map: &Map<String, Value>) -> Option<String> {
    let reference = map.get("$ref")?.as_str()?;
    let pointer = reference.strip_prefix('#')?;
    if pointer.is_empty() || pointer.starts_with('/') {
        Some(pointer.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ref_free_document_is_unchanged() {
        let document = json!({
            "definitions": {
                "date": {"type": "string", "subtype": "date", "format": "date"}
            },
            "list": [1, 2, {"nested": null}]
        });
        assert_eq!(dereference(&document), document);
    }

    #[test]
    fn local_ref_is_inlined() {
        let document = json!({
            "definitions": {
                "base": {"type": "string"},
                "derived": {"$ref": "#/definitions/base"}
            }
        });
        let expanded = dereference(&document);
        assert_eq!(expanded["definitions"]["derived"], json!({"type": "string"}));
    }

    #[test]
    fn nested_refs_are_followed() {
        let document = json!({
            "a": {"$ref": "#/b"},
            "b": {"inner": {"$ref": "#/c"}},
            "c": {"type": "number"}
        });
        let expanded = dereference(&document);
        assert_eq!(expanded["a"]["inner"], json!({"type": "number"}));
    }

    #[test]
    fn circular_ref_is_left_in_place() {
        let document = json!({
            "a": {"$ref": "#/b"},
            "b": {"child": {"$ref": "#/a"}}
        });
        let expanded = dereference(&document);
        // Expansion of "a" follows #/b, then #/a, and stops when #/b comes
        // around again; the cycling reference stays a $ref node.
        assert_eq!(expanded["a"]["child"], json!({"$ref": "#/b"}));
    }

    #[test]
    fn self_referential_ref_is_left_in_place() {
        let document = json!({"a": {"$ref": "#/a"}});
        let expanded = dereference(&document);
        assert_eq!(expanded, document);
    }

    #[test]
    fn unresolvable_ref_is_left_in_place() {
        let document = json!({"a": {"$ref": "#/definitions/missing"}});
        assert_eq!(dereference(&document), document);
    }

    #[test]
    fn remote_ref_is_left_in_place() {
        let document = json!({"a": {"$ref": "https://example.com/schema.json#/x"}});
        assert_eq!(dereference(&document), document);
    }

    #[test]
    fn refs_inside_arrays_are_inlined() {
        let document = json!({
            "anyOf": [{"$ref": "#/definitions/base"}],
            "definitions": {"base": {"type": "string"}}
        });
        let expanded = dereference(&document);
        assert_eq!(expanded["anyOf"][0], json!({"type": "string"}));
    }

    #[test]
    fn escaped_pointer_tokens_resolve() {
        let document = json!({
            "a": {"$ref": "#/definitions/x~1y"},
            "definitions": {"x/y": {"type": "boolean"}}
        });
        let expanded = dereference(&document);
        assert_eq!(expanded["a"], json!({"type": "boolean"}));
    }
}
