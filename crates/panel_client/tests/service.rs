use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panel_client::{
    ClientSettings, FailureKind, OperationRequest, ReqwestStagingClient, StagingApi,
    GENERIC_ERROR_DETAIL,
};

fn client_for(server: &MockServer) -> ReqwestStagingClient {
    let settings = ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    };
    ReqwestStagingClient::new(settings).expect("client")
}

fn staging_request() -> OperationRequest {
    OperationRequest::StageData {
        method: "rsync".to_string(),
        username: "alice".to_string(),
        local_path: "/data/a".to_string(),
        relative_path: "b/c".to_string(),
    }
}

#[tokio::test]
async fn stage_data_sends_method_and_username_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stage-data/"))
        .and(query_param("method", "rsync"))
        .and(query_param("username", "alice"))
        .and(body_json(json!({
            "data": {
                "local_path_on_storage": "/data/a",
                "relative_path": "b/c",
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = client.submit(&staging_request()).await.expect("submit ok");
    assert_eq!(payload, json!({"status": "queued"}));
}

#[tokio::test]
async fn create_file_sends_filename_and_content_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-file/"))
        .and(body_json(json!({
            "filename": "notes.txt",
            "content": "hello",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "filename": "notes.txt"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = OperationRequest::CreateFile {
        filename: "notes.txt".to_string(),
        content: "hello".to_string(),
    };

    let payload = client.submit(&request).await.expect("submit ok");
    assert_eq!(payload, json!({"status": "success", "filename": "notes.txt"}));
}

#[tokio::test]
async fn service_detail_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stage-data/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid staging method."})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.submit(&staging_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Service { status: 400 });
    assert_eq!(err.detail(), "Invalid staging method.");
}

#[tokio::test]
async fn unstructured_error_body_falls_back_to_generic_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stage-data/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>crash</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.submit(&staging_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Service { status: 500 });
    assert_eq!(err.detail(), GENERIC_ERROR_DETAIL);
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let settings = ClientSettings {
        // Discard port; nothing listens there.
        base_url: "http://127.0.0.1:9".to_string(),
        ..ClientSettings::default()
    };
    let client = ReqwestStagingClient::new(settings).expect("client");

    let err = client.submit(&staging_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(err.detail(), GENERIC_ERROR_DETAIL);
}

#[tokio::test]
async fn slow_service_is_a_timeout_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("late"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let client = ReqwestStagingClient::new(settings).expect("client");

    let err = client.fetch_logs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn non_json_success_payload_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-file/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("created"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = OperationRequest::CreateFile {
        filename: "notes.txt".to_string(),
        content: "hello".to_string(),
    };

    let err = client.submit(&request).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn logs_are_returned_as_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("line one\nline two\n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.fetch_logs().await.expect("logs ok");
    assert_eq!(text, "line one\nline two\n");
}

#[tokio::test]
async fn logs_server_error_keeps_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_logs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Service { status: 500 });
}

#[tokio::test]
async fn allowed_methods_preserve_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/allowed-methods/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "allowed_methods": ["rsync", "xrootd", "gridftp"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let methods = client.fetch_allowed_methods().await.expect("methods ok");
    assert_eq!(
        methods,
        vec![
            "rsync".to_string(),
            "xrootd".to_string(),
            "gridftp".to_string()
        ]
    );
}

#[tokio::test]
async fn allowed_methods_with_wrong_shape_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/allowed-methods/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"methods": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_allowed_methods().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn base_url_subpath_is_kept_when_building_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/svc/logs/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tail"))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: format!("{}/svc", server.uri()),
        ..ClientSettings::default()
    };
    let client = ReqwestStagingClient::new(settings).expect("client");

    let text = client.fetch_logs().await.expect("logs ok");
    assert_eq!(text, "tail");
}
