//! # oplint-text — Text Checks
//!
//! The three independent checks applied to `title`/`description` strings in
//! openEO process and subtype-schema documents:
//!
//! - [`markdown`] — structural markdown linting of a single JSON string value
//! - [`spelling`] — dictionary-based spell checking of the prose portions
//! - [`links`] — validation of `` `name()` `` process references against the
//!   set of known process identifiers
//!
//! All checks are pure: they take the text (and the shared dictionary or
//! identifier list) and return findings. Composition into suite-level checks
//! happens in `oplint-cli`.

pub mod links;
pub mod markdown;
pub mod spelling;

pub use markdown::MarkdownFinding;
pub use spelling::SpellChecker;
