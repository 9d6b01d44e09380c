//! Request runner tests against wiremock mock servers

use super::*;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_json, header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock prediction endpoint for controlled scenarios
pub struct MockPredictionServer {
    server: MockServer,
}

impl MockPredictionServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.server.uri())
    }

    pub async fn respond_with(&self, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }
}

fn client_for(server: &MockPredictionServer, timeout: Duration) -> HttpPredictionClient {
    HttpPredictionClient::new(&server.predict_url(), timeout).unwrap()
}

#[tokio::test]
async fn test_success_returns_label() {
    let server = MockPredictionServer::new().await;
    server
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"label": "real"})))
        .await;

    let result = client_for(&server, Duration::from_secs(5)).predict("hello").await;

    assert!(result.success);
    assert_eq!(result.prediction.as_deref(), Some("real"));
    assert!(result.error.is_none());
    assert!(result.latency_ms >= 0.0);
}

#[tokio::test]
async fn test_sends_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header_exists("user-agent"))
        .and(body_json(json!({"message": "The sky is green"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"label": "fake"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpPredictionClient::new(&format!("{}/predict", server.uri()), Duration::from_secs(5)).unwrap();
    let result = client.predict("The sky is green").await;

    assert!(result.success);
    assert_eq!(result.prediction.as_deref(), Some("fake"));
}

#[tokio::test]
async fn test_missing_label_uses_placeholder() {
    let server = MockPredictionServer::new().await;
    server
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"confidence": 0.7})))
        .await;

    let result = client_for(&server, Duration::from_secs(5)).predict("x").await;

    assert!(result.success);
    assert_eq!(result.prediction.as_deref(), Some(MISSING_LABEL));
}

#[tokio::test]
async fn test_server_error_is_failed_result() {
    let server = MockPredictionServer::new().await;
    server.respond_with(ResponseTemplate::new(500)).await;

    let result = client_for(&server, Duration::from_secs(5)).predict("x").await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Status 500"));
    assert!(result.prediction.is_none());
    assert_eq!(result.status_code, Some(500));
}

#[tokio::test]
async fn test_non_200_success_codes_still_fail() {
    let server = MockPredictionServer::new().await;
    server
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"label": "real"})))
        .await;

    let result = client_for(&server, Duration::from_secs(5)).predict("x").await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Status 201"));
}

#[tokio::test]
async fn test_malformed_json_is_failed_result() {
    let server = MockPredictionServer::new().await;
    server
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .await;

    let result = client_for(&server, Duration::from_secs(5)).predict("x").await;

    assert!(!result.success);
    assert!(result.prediction.is_none());
    assert!(result.error.unwrap().starts_with("Invalid JSON response"));
}

#[tokio::test]
async fn test_timeout_latency_tracks_bound() {
    let server = MockPredictionServer::new().await;
    server
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"label": "real"}))
                .set_delay(Duration::from_secs(5)),
        )
        .await;

    let timeout = Duration::from_millis(300);
    let result = client_for(&server, timeout).predict("x").await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.contains("timed out"), "unexpected error: {}", error);
    assert!(result.latency_ms >= 300.0, "latency {}", result.latency_ms);
    assert!(result.latency_ms < 3000.0, "latency {}", result.latency_ms);
}

#[tokio::test]
async fn test_connection_refused_is_failed_result() {
    // Grab a free port and release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = HttpPredictionClient::new(
        &format!("http://127.0.0.1:{}/predict", port),
        Duration::from_secs(2),
    )
    .unwrap();

    let result = client.predict("x").await;

    assert!(!result.success);
    assert!(!result.error.unwrap().is_empty());
    assert!(result.latency_ms >= 0.0);
    assert!(result.status_code.is_none());
}

#[tokio::test]
async fn test_endpoint_is_reported() {
    let server = MockPredictionServer::new().await;
    let client = client_for(&server, Duration::from_secs(1));
    assert_eq!(client.endpoint(), server.predict_url());
    assert_eq!(client.timeout(), Duration::from_secs(1));
}
