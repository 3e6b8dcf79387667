use anyhow::Result;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use std::io::Write;
use std::sync::{Arc, Mutex};

use http_request::{Header, HttpRequestError, RequestBuilder, RequestConfig, RequestListener, Response};

#[tokio::test]
async fn test_get_returns_response_model() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/accounts");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"id": 1}, {"id": 2}]));
    });

    let mut http = RequestBuilder::new();
    let response = http
        .set_expected_status_code(200)
        .get(&server.url("/accounts"))
        .await?;

    mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.to_json_array()?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_post_sends_json_body_and_headers() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/personas")
            .header("Authorization", "Bearer token-123")
            .header("X-Custom", "v")
            .json_body(serde_json::json!({"name": "test", "favorite": false}));
        then.status(201).json_body(serde_json::json!({"id": 7}));
    });

    let mut http = RequestBuilder::new();
    let response = http
        .set_header("X-Custom", "v")
        .set_token("Bearer token-123")
        .set_data(serde_json::json!({"name": "test", "favorite": false}))
        .set_expected_status_code(201)
        .post(&server.url("/personas"))
        .await?;

    mock.assert();
    assert_eq!(response.to_json()?["id"], 7);

    Ok(())
}

#[tokio::test]
async fn test_put_patch_delete_use_their_methods() -> Result<()> {
    let server = MockServer::start();
    let put_mock = server.mock(|when, then| {
        when.method(PUT).path("/items/1");
        then.status(200);
    });
    let patch_mock = server.mock(|when, then| {
        when.method(PATCH).path("/items/1");
        then.status(200);
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/items/1");
        then.status(204);
    });

    let mut http = RequestBuilder::new();
    http.put(&server.url("/items/1")).await?;
    http.patch(&server.url("/items/1")).await?;
    let response = http.delete(&server.url("/items/1")).await?;

    put_mock.assert();
    patch_mock.assert();
    delete_mock.assert();
    assert_eq!(response.status_code, 204);
    assert!(response.body.is_none());

    Ok(())
}

#[tokio::test]
async fn test_path_params_are_expanded_positionally() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/accounts/42/personas/7");
        then.status(200);
    });

    let mut http = RequestBuilder::new();
    http.set_path_params([42, 7])
        .get(&server.url("/accounts/{accountId}/personas/{personaId}"))
        .await?;

    mock.assert();

    Ok(())
}

#[tokio::test]
async fn test_status_mismatch_reports_url_response_and_curl() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404)
            .json_body(serde_json::json!({"message": "not found"}));
    });

    let mut http = RequestBuilder::new();
    let err = http
        .set_header("h1", "v")
        .set_expected_status_code(200)
        .get(&server.url("/missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpRequestError::UnexpectedStatusCode { .. }));
    let message = err.to_string();
    assert!(message.contains("Expected status code 200 but was 404."));
    assert!(message.contains(&format!("Url: {}", server.url("/missing"))));
    assert!(message.contains("not found"));
    assert!(message.contains("Request: curl --request GET"));
    assert!(message.contains("--header 'h1: v'"));
}

#[tokio::test]
async fn test_any_of_multiple_expected_status_codes_passes() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/either");
        then.status(201);
    });

    let mut http = RequestBuilder::new();
    let response = http
        .set_expected_status_codes(vec![200, 201])
        .get(&server.url("/either"))
        .await?;

    assert_eq!(response.status_code, 201);

    Ok(())
}

#[tokio::test]
async fn test_builder_resets_after_success_and_failure() -> Result<()> {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/first").header("h1", "v");
        then.status(500);
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/second");
        then.status(200);
    });

    let mut http = RequestBuilder::new();

    // Failing request still resets the builder.
    let err = http
        .set_header("h1", "v")
        .set_expected_status_code(200)
        .get(&server.url("/first"))
        .await;
    assert!(err.is_err());
    assert!(http.headers().is_empty());
    assert!(http.expected_status_codes().is_empty());

    // The next request goes out clean, without the previous header.
    http.get(&server.url("/second")).await?;

    first.assert();
    second.assert();

    Ok(())
}

#[tokio::test]
async fn test_config_headers_are_overridden_by_builder_headers() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/layered")
            .header("config", "v")
            .header("argument", "h")
            .header("Authorization", "wer");
        then.status(200);
    });

    let config = RequestConfig {
        headers: vec![Header::new("config", "v")],
        ..Default::default()
    };

    let mut http = RequestBuilder::new();
    http.set_config(config)
        .set_header("argument", "h")
        .set_token("wer")
        .get(&server.url("/layered"))
        .await?;

    mock.assert();

    Ok(())
}

#[tokio::test]
async fn test_check_no_errors_rejects_error_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/with-errors");
        then.status(200)
            .json_body(serde_json::json!({"errors": [{"message": "boom"}]}));
    });

    let mut http = RequestBuilder::new();
    let err = http
        .set_check_no_errors(true)
        .get(&server.url("/with-errors"))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpRequestError::ErrorsInResponse { .. }));
    assert!(err.to_string().contains("Response contains errors."));
}

#[tokio::test]
async fn test_check_no_errors_accepts_clean_payload() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/clean");
        then.status(200)
            .json_body(serde_json::json!({"errors": [], "data": 1}));
    });

    let mut http = RequestBuilder::new();
    http.set_check_no_errors(true)
        .get(&server.url("/clean"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_yaml_defaults_apply_to_builder_requests() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/configured")
            .header("Accept", "application/json");
        then.status(200);
    });

    let mut yaml = tempfile::NamedTempFile::new()?;
    writeln!(yaml, "headers:\n  Accept: application/json")?;

    let mut http = RequestBuilder::new();
    http.set_config_file(yaml.path())
        .get(&server.url("/configured"))
        .await?;

    mock.assert();

    Ok(())
}

#[tokio::test]
async fn test_yaml_timeout_aborts_slow_requests() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(std::time::Duration::from_millis(1000));
    });

    let mut yaml = tempfile::NamedTempFile::new().unwrap();
    writeln!(yaml, "connectionTimeout: 100").unwrap();

    let mut http = RequestBuilder::new();
    let err = http
        .set_config_file(yaml.path())
        .get(&server.url("/slow"))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpRequestError::TransportError(_)));
}

#[tokio::test]
async fn test_yaml_max_response_length_truncates_failure_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/verbose-failure");
        then.status(500).body("0123456789abcdef");
    });

    let mut yaml = tempfile::NamedTempFile::new().unwrap();
    writeln!(yaml, "maxResponseLength: 10").unwrap();

    let mut http = RequestBuilder::new();
    let err = http
        .set_config_file(yaml.path())
        .set_expected_status_code(200)
        .get(&server.url("/verbose-failure"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Response: 0123456789\n"));
    assert!(!message.contains("abcdef"));
}

struct RecordingListener {
    calls: Arc<Mutex<Vec<(String, Option<u16>, String)>>>,
}

impl RequestListener for RecordingListener {
    fn on_request_performed(
        &self,
        config: &RequestConfig,
        response: Option<&Response>,
        call_site: &str,
    ) {
        self.calls.lock().unwrap().push((
            config.url.clone().unwrap_or_default(),
            response.map(|r| r.status_code),
            call_site.to_string(),
        ));
    }
}

#[tokio::test]
async fn test_listeners_see_every_request_with_call_site() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/observed");
        then.status(200);
    });

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut http = RequestBuilder::new();
    http.add_request_listener(Box::new(RecordingListener {
        calls: Arc::clone(&calls),
    }));

    http.get(&server.url("/observed")).await?;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, server.url("/observed"));
    assert_eq!(calls[0].1, Some(200));
    assert!(calls[0].2.contains("request_builder_test.rs"));

    Ok(())
}
