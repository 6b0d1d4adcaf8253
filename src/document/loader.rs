//! Desired-configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::document::model::SoftwareConfig;
use crate::document::validation::{validate_document, SchemaViolation};

/// Error type for desired-configuration loading.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema validation failed: {}", join(.0))]
    Schema(Vec<SchemaViolation>),

    #[error("document could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

fn join(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, validate and decode a desired configuration.
pub fn load_desired(path: &Path) -> Result<SoftwareConfig, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    parse_desired(value)
}

/// Validate and decode an already parsed document.
pub fn parse_desired(value: Value) -> Result<SoftwareConfig, DocumentError> {
    validate_document(&value).map_err(DocumentError::Schema)?;
    serde_json::from_value(value).map_err(DocumentError::Decode)
}
