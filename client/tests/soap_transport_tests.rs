//! Integration tests for `HttpSoapTransport` using HTTP stubbing.
//!
//! These tests exercise the real transport against stubbed responses without
//! making real network calls.

use std::time::Duration;

use campaignkit::soap::{HttpSoapTransport, SoapError, SoapTransport};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NS: &str = "https://services.myngp.com/ngponlineservices/";

fn response_envelope() -> String {
    "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
     <soap:Body><EmailSignUpResponse>\
     <EmailSignUpResult>true</EmailSignUpResult>\
     </EmailSignUpResponse></soap:Body></soap:Envelope>"
        .to_string()
}

fn fault_envelope() -> String {
    "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
     <soap:Body><soap:Fault>\
     <faultcode>soap:Server</faultcode>\
     <faultstring>Invalid credentials</faultstring>\
     </soap:Fault></soap:Body></soap:Envelope>"
        .to_string()
}

/// The transport wraps the operation in a SOAP 1.1 envelope and sets the
/// SOAPAction header.
#[tokio::test]
async fn test_call_posts_envelope_with_soap_action() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/svc.asmx"))
        .and(header(
            "SOAPAction",
            "https://services.myngp.com/ngponlineservices/EmailSignUp",
        ))
        .and(header("Content-Type", "text/xml; charset=utf-8"))
        .and(body_string_contains(
            "<EmailSignUp xmlns=\"https://services.myngp.com/ngponlineservices/\">\
             <zip>27514</zip></EmailSignUp>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpSoapTransport::new(
        format!("{}/svc.asmx", server.uri()),
        NS,
        Duration::from_secs(5),
    )
    .expect("transport build");

    let body = transport
        .call("EmailSignUp", "<zip>27514</zip>".to_string())
        .await
        .expect("should succeed");

    assert!(body.contains("<EmailSignUpResult>true</EmailSignUpResult>"));
}

/// A SOAP fault response surfaces as `SoapError::Fault`.
#[tokio::test]
async fn test_fault_response_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/svc.asmx"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault_envelope()))
        .mount(&server)
        .await;

    let transport = HttpSoapTransport::new(
        format!("{}/svc.asmx", server.uri()),
        NS,
        Duration::from_secs(5),
    )
    .expect("transport build");

    let result = transport.call("EmailSignUp", String::new()).await;

    assert!(
        matches!(result, Err(SoapError::Fault { ref code, .. }) if code == "soap:Server"),
        "unexpected result: {result:?}"
    );
}

/// A non-success status without a fault body surfaces as `SoapError::Http`.
#[tokio::test]
async fn test_http_error_without_fault_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/svc.asmx"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let transport = HttpSoapTransport::new(
        format!("{}/svc.asmx", server.uri()),
        NS,
        Duration::from_secs(5),
    )
    .expect("transport build");

    let result = transport.call("EmailSignUp", String::new()).await;

    assert!(matches!(result, Err(SoapError::Http { status: 503, .. })));
}

/// Timeout handling using response delay.
#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/svc.asmx"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(response_envelope())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client build");

    let transport =
        HttpSoapTransport::with_client(http_client, format!("{}/svc.asmx", server.uri()), NS);

    let result = transport.call("EmailSignUp", String::new()).await;

    assert!(matches!(result, Err(SoapError::Request(_))));
}
