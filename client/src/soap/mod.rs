//! SOAP transport for the NGP online services.
//!
//! The transport is trait-based so the service clients can be exercised
//! without touching the network:
//!
//! - [`SoapTransport`] - trait over one SOAP 1.1 operation call
//! - [`HttpSoapTransport`] - real HTTP implementation using reqwest
//! - [`mock::MockSoapTransport`] - recording mock for unit tests (behind the
//!   `test-utils` feature)
//!
//! One call per invocation, bounded timeout, no retries: a transport failure
//! is surfaced as-is for the caller to decide.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::payload::element_text;

/// SOAP 1.1 envelope namespace.
const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Errors surfaced by one SOAP call attempt.
#[derive(Debug, Error)]
pub enum SoapError {
    /// HTTP request failed (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a SOAP fault.
    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    /// Non-success HTTP status without a SOAP fault in the body.
    #[error("HTTP error: {status}")]
    Http { status: u16, body: String },

    /// The response did not contain the expected result element.
    #[error("malformed SOAP response: {0}")]
    Malformed(String),
}

/// Trait over one SOAP operation call.
///
/// `body` is the serialized content of the operation element; the transport
/// owns enveloping, the `SOAPAction` header and fault detection, and returns
/// the raw response envelope for the caller to unwrap.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Perform exactly one network call for `operation`.
    async fn call(&self, operation: &str, body: String) -> Result<String, SoapError>;
}

/// reqwest-based SOAP 1.1 transport.
pub struct HttpSoapTransport {
    client: reqwest::Client,
    endpoint: String,
    namespace: String,
}

impl HttpSoapTransport {
    /// Create a transport for `endpoint` with a bounded request timeout.
    ///
    /// `namespace` qualifies the operation element and prefixes the
    /// `SOAPAction` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SoapError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, namespace))
    }

    /// Create a transport with a custom `reqwest::Client` (for testing with
    /// custom config).
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            namespace: namespace.into(),
        }
    }

    fn envelope(&self, operation: &str, body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <soap:Envelope xmlns:soap=\"{ENVELOPE_NS}\">\
             <soap:Body>\
             <{operation} xmlns=\"{ns}\">{body}</{operation}>\
             </soap:Body>\
             </soap:Envelope>",
            ns = self.namespace,
        )
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn call(&self, operation: &str, body: String) -> Result<String, SoapError> {
        let action = format!("{}{}", self.namespace, operation);

        tracing::debug!(operation, endpoint = %self.endpoint, "sending SOAP request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", &action)
            .body(self.envelope(operation, &body))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if let Some((code, message)) = parse_fault(&text) {
            tracing::warn!(operation, %code, "SOAP fault");
            return Err(SoapError::Fault { code, message });
        }

        if !status.is_success() {
            return Err(SoapError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

/// Extract `faultcode`/`faultstring` when the body carries a SOAP fault.
fn parse_fault(body: &str) -> Option<(String, String)> {
    let code = element_text(body, "faultcode")?;
    let message = element_text(body, "faultstring").unwrap_or_default();
    Some((code, message))
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock transport for unit testing.

    use super::{SoapError, SoapTransport};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of [`SoapTransport`] for unit tests.
    ///
    /// Configure the next response with [`MockSoapTransport::set_result`] and
    /// inspect recorded traffic with [`MockSoapTransport::calls`], in
    /// particular that a rejected form produced zero calls.
    pub struct MockSoapTransport {
        result: Mutex<Option<Result<String, SoapError>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockSoapTransport {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `call`.
        pub fn set_result(&self, result: Result<String, SoapError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        /// All `(operation, body)` pairs observed so far.
        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of calls observed so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Default for MockSoapTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SoapTransport for MockSoapTransport {
        async fn call(&self, operation: &str, body: String) -> Result<String, SoapError> {
            self.calls
                .lock()
                .unwrap()
                .push((operation.to_string(), body));

            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(SoapError::Malformed("no canned response".into())))
        }
    }
}
