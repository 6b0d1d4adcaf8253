//! Authenticated client for the platform's configuration API.
//!
//! # Responsibilities
//! - Read the current configuration of a node
//! - Stage a software-management change, then commit it
//! - Surface every non-2xx response with its body
//!
//! # Design Decisions
//! - The bearer credential is required at construction; there is no
//!   unauthenticated client
//! - One bounded request per call, no retries
//! - A failed commit after a successful change is reported as
//!   [`ClientError::Uncommitted`], never rolled back

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::client::types::{ClientError, ClientResult, ConfigEnvelope, Operation, RemoteState};
use crate::config::{ApiSettings, BodyEncoding};
use crate::document::{SoftwareConfig, SOFTWARE_MANAGEMENT};

#[derive(Serialize)]
struct ChangeRequest<'a> {
    node_id: &'a str,
    /// JSON-encoded document.
    config: String,
    formtype: &'static str,
}

#[derive(Serialize)]
struct CommitRequest<'a> {
    action: &'static str,
    message: &'a str,
}

/// Client for one run against one platform.
pub struct RemoteConfigClient {
    client: Client,
    base_url: Url,
    encoding: BodyEncoding,
    request_timeout: Duration,
}

impl RemoteConfigClient {
    /// Build a client that sends `token` as a bearer credential on every call.
    pub fn new(token: &str, settings: &ApiSettings) -> ClientResult<Self> {
        if token.trim().is_empty() {
            return Err(ClientError::Usage("an API token is required".to_string()));
        }
        if token.trim() != token {
            return Err(ClientError::Usage(
                "API token has leading or trailing whitespace".to_string(),
            ));
        }

        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            ClientError::Usage(format!("invalid API base URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Usage(format!(
                "'{}' cannot be used as an API base URL",
                settings.base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::Usage("API token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let request_timeout = Duration::from_secs(settings.request_timeout_secs);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()
            .map_err(|e| ClientError::Usage(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            encoding: settings.body_encoding,
            request_timeout,
        })
    }

    /// Fetch the full configuration of `node_id`.
    pub async fn fetch_current_config(&self, node_id: &str) -> ClientResult<RemoteState> {
        let operation = Operation::FetchConfig;
        let url = self.endpoint(&["config", require_node(node_id)?])?;

        tracing::debug!(%url, "Fetching current configuration");
        let body = self.send(operation, self.client.get(url)).await?;
        let envelope: ConfigEnvelope =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode { operation, source })?;

        tracing::info!(
            node_id,
            bundles = envelope.config.bundles.len(),
            "Current configuration fetched"
        );
        Ok(envelope.config)
    }

    /// Stage `document` and commit it with `commit_message`.
    ///
    /// The commit is only attempted once the change was accepted.
    pub async fn apply_config(
        &self,
        node_id: &str,
        document: &SoftwareConfig,
        commit_message: &str,
    ) -> ClientResult<()> {
        self.submit_change(node_id, document).await?;
        self.commit(commit_message)
            .await
            .map_err(|source| ClientError::Uncommitted {
                node_id: node_id.to_string(),
                source: Box::new(source),
            })
    }

    /// Stage `document` as a pending software-management change.
    pub async fn submit_change(&self, node_id: &str, document: &SoftwareConfig) -> ClientResult<()> {
        let operation = Operation::Change;
        let config = serde_json::to_string(document)
            .map_err(|source| ClientError::Encode { operation, source })?;
        let payload = ChangeRequest {
            node_id: require_node(node_id)?,
            config,
            formtype: SOFTWARE_MANAGEMENT,
        };

        tracing::info!(node_id, items = document.items.len(), "Posting new configuration");
        let url = self.endpoint(&["change"])?;
        let ack = self.send(operation, self.write(url, &payload)).await?;
        tracing::info!(response = %ack, "Change accepted");
        Ok(())
    }

    /// Commit all pending changes.
    pub async fn commit(&self, message: &str) -> ClientResult<()> {
        let payload = CommitRequest {
            action: "commit",
            message,
        };

        tracing::info!(commit_message = message, "Committing configuration");
        let url = self.endpoint(&["commit"])?;
        let ack = self.send(Operation::Commit, self.write(url, &payload)).await?;
        tracing::info!(response = %ack, "Commit accepted");
        Ok(())
    }

    fn write<T: Serialize>(&self, url: Url, payload: &T) -> RequestBuilder {
        let request = self.client.post(url);
        match self.encoding {
            BodyEncoding::Json => request.json(payload),
            BodyEncoding::Form => request.form(payload),
        }
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, operation: Operation, request: RequestBuilder) -> ClientResult<String> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        if !status.is_success() {
            tracing::error!(%operation, %status, body = %body, "API call failed");
            return Err(ClientError::Status {
                operation,
                status,
                body,
            });
        }
        Ok(body)
    }

    /// Resolve path segments against the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Usage(format!("'{}' cannot be used as an API base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn require_node(node_id: &str) -> ClientResult<&str> {
    if node_id.trim().is_empty() {
        Err(ClientError::Usage("a device group identifier is required".to_string()))
    } else {
        Ok(node_id)
    }
}

impl std::fmt::Debug for RemoteConfigClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfigClient")
            .field("base_url", &self.base_url.as_str())
            .field("encoding", &self.encoding)
            .field("timeout_secs", &self.request_timeout.as_secs())
            .finish()
    }
}
