//! # Schema Source Resolver
//!
//! Fetches the subtype-schema document from the configured location: a URL
//! (anything containing a scheme separator) or a filesystem path relative to
//! the working directory. An empty location falls back to the fixed public
//! default. Every fetch is a single attempt; failures surface to the caller.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Public location of the openEO subtype-schema document.
pub const DEFAULT_SUBTYPE_SCHEMAS_URL: &str =
    "https://processes.openeo.org/meta/subtype-schemas.json";

/// Error while resolving a schema source.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The HTTP request failed or returned a non-success status.
    #[error("request for {url} failed: {source}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },

    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("{location} is not valid JSON: {source}")]
    Parse {
        /// URL or path of the offending document.
        location: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Fetch a schema document as raw text.
pub fn fetch_text(location: &str) -> Result<String, ResolveError> {
    let location = effective_location(location);
    if location.contains("://") {
        tracing::debug!(url = location, "fetching schema document");
        reqwest::blocking::get(location)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| ResolveError::Http {
                url: location.to_string(),
                source: e,
            })
    } else {
        let path = Path::new(location);
        tracing::debug!(path = %path.display(), "reading schema document");
        std::fs::read_to_string(path).map_err(|e| ResolveError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Fetch a schema document and parse it as JSON.
pub fn fetch_json(location: &str) -> Result<Value, ResolveError> {
    let text = fetch_text(location)?;
    serde_json::from_str(&text).map_err(|e| ResolveError::Parse {
        location: effective_location(location).to_string(),
        source: e,
    })
}

fn effective_location(location: &str) -> &str {
    if location.is_empty() {
        DEFAULT_SUBTYPE_SCHEMAS_URL
    } else {
        location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_location_means_the_public_default() {
        assert_eq!(effective_location(""), DEFAULT_SUBTYPE_SCHEMAS_URL);
        assert_eq!(effective_location("meta.json"), "meta.json");
    }

    #[test]
    fn reads_local_file_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subtypes.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"definitions": {}}"#).unwrap();

        let value = fetch_json(path.to_str().unwrap()).unwrap();
        assert!(value["definitions"].is_object());
    }

    #[test]
    fn reads_local_file_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subtypes.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{}").unwrap();

        assert_eq!(fetch_text(path.to_str().unwrap()).unwrap(), "{}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = fetch_json("/nonexistent/subtypes.json").unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subtypes.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not json").unwrap();

        let err = fetch_json(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
    }
}
