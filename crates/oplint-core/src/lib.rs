//! # oplint-core — Linter Run Configuration
//!
//! Foundational types for the openEO process linter: the run configuration
//! (loaded once from a JSON file and passed by reference into every check)
//! and the accepted-word dictionary used by the spell checks.
//!
//! ## Crate Policy
//!
//! - Configuration is read-only after load. There is no global state and no
//!   environment channel; `main` owns the `Config` and hands out references.
//! - The dictionary is built once at startup (embedded base list plus the
//!   configured `ignoredWords`) and never shrinks.

pub mod config;
pub mod dictionary;

pub use config::{Config, ConfigError, IgnoredWords};
pub use dictionary::Dictionary;
