//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::fetch::{RetryEvent, RetryHandler};
use crate::types::BackoffType;
use reqwest::Method;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(max_retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .max_retries(max_retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

fn recording_handler() -> (RetryHandler, Arc<Mutex<Vec<RetryEvent>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = RetryHandler::new(move |event| sink.lock().unwrap().push(event.clone()));
    (handler, seen)
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("cwlogs/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
}

#[tokio::test]
async fn test_http_client_post_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-Amz-Target", "Logs_20140328.FilterLogEvents"))
        .and(body_json(json!({"logGroupName": "app"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
        .mount(&mock_server)
        .await;

    let client = fast_client(0);
    let body: serde_json::Value = client
        .request_json(
            Method::POST,
            &mock_server.uri(),
            RequestConfig::new()
                .header("X-Amz-Target", "Logs_20140328.FilterLogEvents")
                .json(json!({"logGroupName": "app"})),
            &RetryHandler::noop(),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"events": []}));
}

#[tokio::test]
async fn test_http_client_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-Api-Key", "secret123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-Api-Key", "secret123")
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let response = client
        .request_observed(
            Method::POST,
            &mock_server.uri(),
            RequestConfig::new(),
            &RetryHandler::noop(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = fast_client(3);
    let (handler, seen) = recording_handler();
    let err = client
        .request_observed(
            Method::POST,
            &format!("{}/missing", mock_server.uri()),
            RequestConfig::new(),
            &handler,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_client_retry_on_500_notifies() {
    let mock_server = MockServer::start().await;

    // First two calls return 500, third succeeds
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = fast_client(3);
    let (handler, seen) = recording_handler();
    let response = client
        .request_observed(Method::POST, &mock_server.uri(), RequestConfig::new(), &handler)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].attempt, 1);
    assert_eq!(seen[1].attempt, 2);
    assert_eq!(seen[0].max_retries, 3);
    assert_eq!(seen[0].reason, "HTTP 500");
}

#[tokio::test]
async fn test_http_client_retries_throttling_exception() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "ThrottlingException",
            "message": "Rate exceeded"
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
        .mount(&mock_server)
        .await;

    let client = fast_client(2);
    let (handler, seen) = recording_handler();
    let response = client
        .request_observed(Method::POST, &mock_server.uri(), RequestConfig::new(), &handler)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(seen.lock().unwrap()[0].reason, "ThrottlingException");
}

#[tokio::test]
async fn test_http_client_other_400_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "ResourceNotFoundException",
            "message": "The specified log group does not exist."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(3);
    let (handler, seen) = recording_handler();
    let err = client
        .request_observed(Method::POST, &mock_server.uri(), RequestConfig::new(), &handler)
        .await
        .unwrap_err();
    assert!(seen.lock().unwrap().is_empty());

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("ResourceNotFoundException"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_rate_limit_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "1")
                .set_body_string("Rate limited"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = fast_client(2);
    let (handler, seen) = recording_handler();
    let response = client
        .request_observed(Method::POST, &mock_server.uri(), RequestConfig::new(), &handler)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(seen.lock().unwrap()[0].delay, Duration::from_secs(1));
}

#[tokio::test]
async fn test_http_client_max_retries_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(2);
    let (handler, seen) = recording_handler();
    let err = client
        .request_observed(Method::POST, &mock_server.uri(), RequestConfig::new(), &handler)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_calculate_backoff_constant() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(800));
}

#[test]
fn test_calculate_backoff_respects_max() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_calculate_backoff_saturates_on_huge_config() {
    let max = Duration::from_secs(20);
    for backoff_type in [BackoffType::Linear, BackoffType::Exponential] {
        let config = HttpClientConfig::builder()
            .backoff(backoff_type, Duration::from_millis(1_000_000_000_000_000), max)
            .no_rate_limit()
            .build();
        let client = HttpClient::with_config(config).unwrap();

        assert_eq!(client.calculate_backoff(30), max);
        assert_eq!(client.calculate_backoff(u32::MAX), max);
    }
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_rate_limiter: true"));
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config(config).unwrap();

    for _ in 0..3 {
        let response = client
            .request_observed(
                Method::POST,
                &mock_server.uri(),
                RequestConfig::new(),
                &RetryHandler::noop(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
