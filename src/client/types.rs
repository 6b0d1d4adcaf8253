//! Remote state and error definitions.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Configuration of a node as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteState {
    /// Names of the bundles currently configured.
    #[serde(default)]
    pub bundles: BTreeSet<String>,

    /// Bundle name → bundle document.
    #[serde(default)]
    pub bundle_data: BTreeMap<String, Value>,
}

impl RemoteState {
    pub fn has_bundle(&self, name: &str) -> bool {
        self.bundles.contains(name)
    }

    /// Add a configured bundle and its data.
    pub fn with_bundle(mut self, name: impl Into<String>, data: Value) -> Self {
        let name = name.into();
        self.bundles.insert(name.clone());
        self.bundle_data.insert(name, data);
        self
    }
}

/// Body of `GET config/{node_id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ConfigEnvelope {
    pub config: RemoteState,
}

/// Remote call, used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchConfig,
    Change,
    Commit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::FetchConfig => "config fetch",
            Operation::Change => "change",
            Operation::Commit => "commit",
        })
    }
}

/// Errors raised by the remote configuration client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client used or built incorrectly; always a caller bug.
    #[error("invalid client usage: {0}")]
    Usage(String),

    /// Request never produced a response (DNS, connect, timeout, ...).
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Response outside the 2xx range.
    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: Operation,
        status: StatusCode,
        body: String,
    },

    /// Request body could not be serialized.
    #[error("{operation} request could not be encoded: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// Successful response whose body could not be decoded.
    #[error("{operation} response could not be decoded: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// The change was staged but the commit failed.
    #[error(
        "change for '{node_id}' was staged but not committed; \
         the pending change needs manual follow-up: {source}"
    )]
    Uncommitted {
        node_id: String,
        #[source]
        source: Box<ClientError>,
    },
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
