//! Settings schema definitions.
//!
//! All types derive Serde traits for deserialization from the settings file.
//! Every field has a default so an absent file and an empty file behave the
//! same.

use serde::{Deserialize, Serialize};

/// Root settings for a run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Remote platform API settings.
    pub api: ApiSettings,

    /// Observability settings.
    pub observability: ObservabilitySettings,
}

/// Remote platform API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// API root; `config/`, `change` and `commit` are resolved against it.
    pub base_url: String,

    /// Upper bound for a single request, including the response body.
    pub request_timeout_secs: u64,

    /// Upper bound for establishing the connection.
    pub connect_timeout_secs: u64,

    /// Encoding of `change` and `commit` request bodies.
    pub body_encoding: BodyEncoding,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.app.qbee.io/api/v2/".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            body_encoding: BodyEncoding::Json,
        }
    }
}

/// Request body encoding for write calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
