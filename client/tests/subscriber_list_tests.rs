//! Integration tests for the subscriber list client using HTTP stubbing.

use std::time::Duration;

use campaignkit::revmsg::{RevMsgError, Subscriber, SubscriberListClient};
use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn subscriber() -> Subscriber {
    Subscriber {
        phone: "0001112222".into(),
        email: "john.smith@example.com".into(),
        zip: "12345".into(),
        full_name: "John Smith".into(),
        ..Subscriber::default()
    }
}

fn client_for(server: &MockServer) -> SubscriberListClient {
    SubscriberListClient::with_client(reqwest::Client::new(), server.uri(), "list-uuid")
}

/// Subscribe POSTs the URL-encoded form body to the list endpoint.
#[tokio::test]
async fn test_subscribe_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list-uuid/"))
        .and(body_string(
            "phone=0001112222&email=john.smith%40example.com&zip=12345&name=John%20Smith",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.subscribe(&subscriber()).await;

    let result = outcome.result().expect("completed");
    assert!(result.is_accepted());
    assert!(result.message.is_none());
}

/// A reported failure is a business result, not a fault.
#[tokio::test]
async fn test_subscribe_business_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list-uuid/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "message": "Phone number is invalid"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.subscribe(&subscriber()).await;

    let result = outcome.result().expect("completed");
    assert!(!result.is_accepted());
    assert_eq!(result.message.as_deref(), Some("Phone number is invalid"));
    assert!(!outcome.has_fault());
}

/// Unsubscribe targets the `/true`-suffixed endpoint with only the phone.
#[tokio::test]
async fn test_unsubscribe_hits_marked_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list-uuid/true"))
        .and(body_string("phone=0001112222"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.unsubscribe("0001112222").await;

    assert!(outcome.result().expect("completed").is_accepted());
}

/// A missing required field stops the call before the network.
#[tokio::test]
async fn test_invalid_subscriber_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let mut incomplete = subscriber();
    incomplete.zip = String::new();

    let outcome = client.subscribe(&incomplete).await;

    assert_eq!(outcome.errors(), ["zip is required".to_string()]);
    server.verify().await;
}

/// A non-success status surfaces as a fault carrying the status.
#[tokio::test]
async fn test_server_error_is_a_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list-uuid/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.subscribe(&subscriber()).await;

    assert!(matches!(
        outcome.fault(),
        Some(RevMsgError::Api { status: 500, .. })
    ));
}

/// A non-JSON body surfaces as a fault, not a panic.
#[tokio::test]
async fn test_malformed_body_is_a_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list-uuid/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.subscribe(&subscriber()).await;

    assert!(matches!(outcome.fault(), Some(RevMsgError::Malformed(_))));
}

/// Timeout handling using response delay.
#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list-uuid/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "error": false }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client build");

    let client = SubscriberListClient::with_client(http_client, server.uri(), "list-uuid");
    let outcome = client.subscribe(&subscriber()).await;

    assert!(matches!(outcome.fault(), Some(RevMsgError::Request(_))));
}
