//! # Run Configuration
//!
//! Loads the linter configuration from a JSON file with camelCase option
//! names:
//!
//! ```json
//! {
//!     "verbose": true,
//!     "checkSubtypeSchemas": true,
//!     "subtypeSchemas": "meta/subtype-schemas.json",
//!     "ignoredWords": ["openEO", "datacube"],
//!     "forbidDeprecatedTypes": true,
//!     "checkProcessLinks": true
//! }
//! ```
//!
//! Path problems (missing argument, wrong extension, nonexistent file) are
//! usage errors and map to exit code 2; a file that exists but does not parse
//! is a fatal run error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error while locating or loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The CLI argument is missing, empty, or does not name a `.json` file.
    #[error("please provide a path to a .json config file")]
    Usage,

    /// The configuration file does not exist.
    #[error("config file does not exist: {0}")]
    Missing(PathBuf),

    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Whether this error is a usage error (exit code 2) rather than a
    /// run failure (exit code 1).
    pub fn is_usage(&self) -> bool {
        matches!(self, ConfigError::Usage | ConfigError::Missing(_))
    }
}

/// The `ignoredWords` option: either a path to a newline-delimited word list
/// or an inline array of words.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IgnoredWords {
    /// Path to a newline-delimited word list file.
    Path(String),
    /// Inline list of words.
    List(Vec<String>),
}

impl Default for IgnoredWords {
    fn default() -> Self {
        IgnoredWords::List(Vec::new())
    }
}

/// Linter run configuration, read-only after load. Unrecognized options in
/// the file are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Extra diagnostic output and raised tracing verbosity.
    pub verbose: bool,

    /// Run the subtype-schema suite in addition to the process suite.
    pub check_subtype_schemas: bool,

    /// URL or filesystem path of the subtype-schema document. Empty means
    /// the fixed public default (see `oplint-schema`).
    pub subtype_schemas: String,

    /// Words accepted by the spell checks on top of the base dictionary.
    pub ignored_words: IgnoredWords,

    /// Treat usage of a deprecated subtype as a schema compilation error.
    pub forbid_deprecated_types: bool,

    /// Check `` `name()` `` references against the set of known process ids.
    pub check_process_links: bool,

    /// Directory containing the process definition `*.json` files.
    pub processes: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbose: false,
            check_subtype_schemas: false,
            subtype_schemas: String::new(),
            ignored_words: IgnoredWords::default(),
            forbid_deprecated_types: false,
            check_process_links: false,
            processes: "processes".to_string(),
        }
    }
}

impl Config {
    /// Validate the CLI argument and resolve it to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Usage` if the argument is empty or does not end
    /// in `.json`, and `ConfigError::Missing` if the file does not exist.
    /// Both are usage errors and map to exit code 2.
    pub fn resolve_path(arg: &str) -> Result<PathBuf, ConfigError> {
        if arg.is_empty() || !arg.ends_with(".json") {
            return Err(ConfigError::Usage);
        }
        let path = Path::new(arg);
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        Ok(path.to_path_buf())
    }

    /// Load the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if it is not a valid JSON configuration object.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Materialize the `ignoredWords` option into a word list.
    ///
    /// A string value names a newline-delimited file; a missing file yields
    /// an empty list rather than an error.
    pub fn ignored_words(&self) -> Result<Vec<String>, ConfigError> {
        match &self.ignored_words {
            IgnoredWords::List(words) => Ok(words.clone()),
            IgnoredWords::Path(path) if path.is_empty() => Ok(Vec::new()),
            IgnoredWords::Path(path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Ok(Vec::new());
                }
                let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                Ok(content
                    .lines()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty())
                    .collect())
            }
        }
    }
}
