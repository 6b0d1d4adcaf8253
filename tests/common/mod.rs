//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use swm_sync::config::Settings;

/// A request as seen by the mock platform.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

struct PlatformState {
    config: Value,
    config_status: StatusCode,
    change_status: StatusCode,
    commit_status: StatusCode,
    requests: Vec<Recorded>,
}

/// In-process stand-in for the platform's v2 API.
#[derive(Clone)]
pub struct MockPlatform {
    pub addr: SocketAddr,
    state: Arc<Mutex<PlatformState>>,
}

impl MockPlatform {
    /// Start a platform whose node configuration is `remote`
    /// (the inner `{"bundles": .., "bundle_data": ..}` object).
    pub async fn start(remote: Value) -> Self {
        let state = Arc::new(Mutex::new(PlatformState {
            config: json!({ "config": remote }),
            config_status: StatusCode::OK,
            change_status: StatusCode::OK,
            commit_status: StatusCode::OK,
            requests: Vec::new(),
        }));

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn fail_config(&self, status: StatusCode) {
        self.state.lock().unwrap().config_status = status;
    }

    pub fn fail_change(&self, status: StatusCode) {
        self.state.lock().unwrap().change_status = status;
    }

    pub fn fail_commit(&self, status: StatusCode) {
        self.state.lock().unwrap().commit_status = status;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = format!("http://{}/api/v2/", self.addr);
        settings.api.request_timeout_secs = 5;
        settings
    }
}

async fn handle(
    State(state): State<Arc<Mutex<PlatformState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body,
    });

    let path = uri.path();
    if method == Method::GET && path.starts_with("/api/v2/config/") {
        if state.config_status.is_success() {
            (state.config_status, state.config.to_string())
        } else {
            (state.config_status, r#"{"error":"config unavailable"}"#.to_string())
        }
    } else if method == Method::POST && path == "/api/v2/change" {
        let status = state.change_status;
        let body = if status.is_success() {
            r#"{"sha":"c0ffee","status":"new"}"#
        } else {
            r#"{"error":"change rejected"}"#
        };
        (status, body.to_string())
    } else if method == Method::POST && path == "/api/v2/commit" {
        let status = state.commit_status;
        let body = if status.is_success() {
            r#"{"sha":"beef","message":"committed"}"#
        } else {
            r#"{"error":"commit failed"}"#
        };
        (status, body.to_string())
    } else {
        (StatusCode::NOT_FOUND, "not found".to_string())
    }
}

/// Remote state with a software-management bundle holding `bundle`.
pub fn remote_with_bundle(bundle: Value) -> Value {
    json!({
        "bundles": ["software_management", "users"],
        "bundle_data": {
            "software_management": bundle,
            "users": {"enabled": true, "version": "v1", "items": []}
        }
    })
}

/// Remote state without a software-management bundle.
pub fn remote_without_bundle() -> Value {
    json!({
        "bundles": ["users"],
        "bundle_data": {"users": {"enabled": true, "version": "v1", "items": []}}
    })
}

/// Write `document` to a temporary file.
pub fn desired_file(document: &Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", document).unwrap();
    file
}

/// Address that refuses connections.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
