//! # oplint-schema — Schema Handling
//!
//! Everything the linter does with JSON Schema documents:
//!
//! - [`resolver`] — fetch the subtype-schema document from a URL or path
//! - [`deref`] — inline local `$ref` pointers with an explicit cycle guard
//! - [`subtypes`] — registry over the dereferenced `definitions` map
//! - [`validator`] — draft-07 validator factory with the `subtype`,
//!   `dimensions`, and `parameters` keywords
//! - [`walker`] — worklist traversal applying spell and format/subtype
//!   consistency checks at every level
//!
//! Schema compilation itself is delegated to the `jsonschema` crate; the
//! custom keywords extend it with openEO's domain rules.

pub mod deref;
pub mod resolver;
pub mod subtypes;
pub mod validator;
pub mod walker;

mod keywords;

pub use resolver::{fetch_json, fetch_text, ResolveError, DEFAULT_SUBTYPE_SCHEMAS_URL};
pub use subtypes::{RegistryError, SubtypeRegistry};
pub use validator::{FactoryError, ValidatorFactory};
pub use walker::SchemaIssue;
