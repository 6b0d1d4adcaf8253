//! Wire-level tests for the remote configuration client.

use axum::http::{Method, StatusCode};
use serde_json::json;

use swm_sync::client::{ClientError, Operation, RemoteConfigClient};
use swm_sync::config::BodyEncoding;
use swm_sync::document::{Item, SoftwareConfig};

mod common;
use common::MockPlatform;

fn document() -> SoftwareConfig {
    SoftwareConfig::new(
        true,
        "v1",
        vec![Item::package("nginx").with_config_file("/tmpl/nginx.conf", "/etc/nginx/nginx.conf")],
    )
}

#[tokio::test]
async fn test_fetch_sends_bearer_and_decodes_state() {
    let platform = MockPlatform::start(common::remote_with_bundle(json!({
        "enabled": true, "version": "v1", "items": []
    })))
    .await;
    let client = RemoteConfigClient::new("tok-123", &platform.settings().api).unwrap();

    let state = client.fetch_current_config("group-7").await.unwrap();

    assert!(state.has_bundle("software_management"));
    assert!(state.has_bundle("users"));
    let requests = platform.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/v2/config/group-7");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_fetch_error_carries_body() {
    let platform = MockPlatform::start(common::remote_without_bundle()).await;
    platform.fail_config(StatusCode::FORBIDDEN);
    let client = RemoteConfigClient::new("tok", &platform.settings().api).unwrap();

    let err = client.fetch_current_config("group").await.unwrap_err();
    match err {
        ClientError::Status { operation, status, body } => {
            assert_eq!(operation, Operation::FetchConfig);
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert!(body.contains("config unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_apply_posts_change_then_commit() {
    let platform = MockPlatform::start(common::remote_without_bundle()).await;
    let client = RemoteConfigClient::new("tok", &platform.settings().api).unwrap();

    client.apply_config("group", &document(), "add nginx").await.unwrap();

    let requests = platform.requests();
    assert_eq!(platform.paths(), vec!["/api/v2/change", "/api/v2/commit"]);
    assert!(requests.iter().all(|r| r.authorization.as_deref() == Some("Bearer tok")));

    let change = requests[0].json();
    assert_eq!(change["node_id"], "group");
    assert_eq!(change["formtype"], "software_management");
    let staged: SoftwareConfig = serde_json::from_str(change["config"].as_str().unwrap()).unwrap();
    assert_eq!(staged, document());

    assert_eq!(requests[1].json(), json!({"action": "commit", "message": "add nginx"}));
}

#[tokio::test]
async fn test_failed_change_skips_commit() {
    let platform = MockPlatform::start(common::remote_without_bundle()).await;
    platform.fail_change(StatusCode::BAD_REQUEST);
    let client = RemoteConfigClient::new("tok", &platform.settings().api).unwrap();

    let err = client.apply_config("group", &document(), "msg").await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Status { operation: Operation::Change, status, .. } if status == StatusCode::BAD_REQUEST
    ));
    assert_eq!(platform.paths(), vec!["/api/v2/change"]);
}

#[tokio::test]
async fn test_failed_commit_reports_uncommitted_change() {
    let platform = MockPlatform::start(common::remote_without_bundle()).await;
    platform.fail_commit(StatusCode::INTERNAL_SERVER_ERROR);
    let client = RemoteConfigClient::new("tok", &platform.settings().api).unwrap();

    let err = client.apply_config("group", &document(), "msg").await.unwrap_err();

    match &err {
        ClientError::Uncommitted { node_id, source } => {
            assert_eq!(node_id, "group");
            assert!(matches!(
                **source,
                ClientError::Status { operation: Operation::Commit, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("commit failed"));
    // Exactly one attempt each; nothing retried or rolled back.
    assert_eq!(platform.paths(), vec!["/api/v2/change", "/api/v2/commit"]);
}

#[tokio::test]
async fn test_form_encoding() {
    let platform = MockPlatform::start(common::remote_without_bundle()).await;
    let mut settings = platform.settings();
    settings.api.body_encoding = BodyEncoding::Form;
    let client = RemoteConfigClient::new("tok", &settings.api).unwrap();

    client.apply_config("group", &document(), "form commit").await.unwrap();

    let requests = platform.requests();
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    let fields = requests[0].form();
    assert!(fields.contains(&("node_id".to_string(), "group".to_string())));
    assert!(fields.contains(&("formtype".to_string(), "software_management".to_string())));
    let config = fields.iter().find(|(k, _)| k == "config").map(|(_, v)| v.clone()).unwrap();
    assert_eq!(serde_json::from_str::<SoftwareConfig>(&config).unwrap(), document());

    assert!(requests[1]
        .form()
        .contains(&("message".to_string(), "form commit".to_string())));
}

#[tokio::test]
async fn test_unreachable_platform_is_transport_error() {
    let addr = common::closed_addr().await;
    let mut settings = swm_sync::config::Settings::default();
    settings.api.base_url = format!("http://{}/api/v2/", addr);
    let client = RemoteConfigClient::new("tok", &settings.api).unwrap();

    let err = client.fetch_current_config("group").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport { operation: Operation::FetchConfig, .. }
    ));
}
