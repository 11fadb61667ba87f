//! Revolution Messaging subscriber list client.
//!
//! Subscribes and unsubscribes phone numbers on a subscriber list identified
//! by UUID. Requests are URL-encoded form POSTs; responses are JSON with a
//! boolean `error` flag and a `message` on failure. A reported failure is a
//! business result for the caller to interpret, not a transport fault.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::RevMsgConfig;
use crate::outcome::Outcome;
use crate::payload::encode_form;

/// Errors surfaced by one subscriber list call attempt.
#[derive(Debug, Error)]
pub enum RevMsgError {
    /// HTTP request failed (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON document.
    #[error("malformed API response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Subscriber details.
///
/// `phone`, `email` and `zip` are required by default. Use either
/// `full_name` or the `first_name`/`last_name` pair, not both. Any number of
/// additional attributes go through `custom` as custom fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscriber {
    /// Phone number, digits only.
    pub phone: String,
    pub email: String,
    pub zip: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    /// Audience tags; comma-joined on the wire.
    pub tags: Vec<String>,
    /// Custom fields, sent in the given order.
    pub custom: Vec<(String, String)>,
}

impl Subscriber {
    /// Whether the slot named by `field` is unset. Unknown names count as
    /// unset so a misconfigured required list fails closed.
    fn is_blank(&self, field: &str) -> bool {
        match field {
            "phone" => self.phone.is_empty(),
            "email" => self.email.is_empty(),
            "zip" => self.zip.is_empty(),
            "fname" => self.first_name.is_empty(),
            "lname" => self.last_name.is_empty(),
            "name" => self.full_name.is_empty(),
            "tags" => self.tags.is_empty(),
            _ => true,
        }
    }

    /// Form pairs in fixed wire order; optional slots are omitted when
    /// unset.
    fn form_pairs(&self) -> Vec<(&str, String)> {
        let mut pairs = vec![
            ("phone", self.phone.clone()),
            ("email", self.email.clone()),
            ("zip", self.zip.clone()),
        ];
        if !self.first_name.is_empty() {
            pairs.push(("fname", self.first_name.clone()));
        }
        if !self.last_name.is_empty() {
            pairs.push(("lname", self.last_name.clone()));
        }
        if !self.full_name.is_empty() {
            pairs.push(("name", self.full_name.clone()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        for (key, value) in &self.custom {
            pairs.push((key.as_str(), value.clone()));
        }
        pairs
    }
}

/// Parsed API response.
#[derive(Debug, Clone)]
pub struct SubscriptionResult {
    /// True when the service reported a failure.
    pub error: bool,
    /// Failure description, when provided.
    pub message: Option<String>,
    /// The full response document, for callers that need more detail.
    pub raw: Value,
}

impl SubscriptionResult {
    /// True unless the service reported a failure.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        !self.error
    }
}

/// Result of one subscribe or unsubscribe attempt.
pub type SubscribeOutcome = Outcome<SubscriptionResult, RevMsgError>;

/// Client for one Revolution Messaging subscriber list.
pub struct SubscriberListClient {
    client: reqwest::Client,
    base_url: String,
    list_uuid: String,
    required: Vec<String>,
}

impl SubscriberListClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &RevMsgConfig) -> Result<Self, RevMsgError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(
            client,
            config.api_url.clone(),
            config.list_uuid.clone(),
        ))
    }

    /// Create a client with a custom `reqwest::Client` (for testing with
    /// custom config).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        list_uuid: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            list_uuid: list_uuid.into(),
            required: default_required(),
        }
    }

    /// Replace the required-field list. Names are the wire keys (`phone`,
    /// `email`, `zip`, `fname`, `lname`, `name`, `tags`).
    pub fn set_required_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = fields.into_iter().map(Into::into).collect();
    }

    /// Append to the required-field list.
    pub fn add_required_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(fields.into_iter().map(Into::into));
    }

    /// Check the subscriber against the required-field list.
    #[must_use]
    pub fn validate(&self, subscriber: &Subscriber) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| subscriber.is_blank(field))
            .map(|field| format!("{field} is required"))
            .collect()
    }

    /// Add the subscriber to the list.
    pub async fn subscribe(&self, subscriber: &Subscriber) -> SubscribeOutcome {
        let errors = self.validate(subscriber);
        if !errors.is_empty() {
            return Outcome::Invalid(errors);
        }
        let url = format!("{}/{}/", self.base_url, self.list_uuid);
        self.post(url, &subscriber.form_pairs()).await
    }

    /// Remove `phone` from the list. Only the phone number is sent, with no
    /// local validation.
    pub async fn unsubscribe(&self, phone: &str) -> SubscribeOutcome {
        let url = format!("{}/{}/true", self.base_url, self.list_uuid);
        self.post(url, &[("phone", phone.to_string())]).await
    }

    async fn post(&self, url: String, pairs: &[(&str, String)]) -> SubscribeOutcome {
        tracing::debug!(%url, "sending subscriber list request");

        let response = match self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(encode_form(pairs))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Outcome::Fault(e.into()),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Outcome::Fault(e.into()),
        };

        if !status.is_success() {
            return Outcome::Fault(RevMsgError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let raw: Value = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(e) => return Outcome::Fault(e.into()),
        };
        let error = raw.get("error").and_then(Value::as_bool).unwrap_or(false);
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .map(String::from);

        if error {
            tracing::warn!(%url, message = message.as_deref().unwrap_or(""), "subscriber list call rejected");
        }

        Outcome::Completed(SubscriptionResult {
            error,
            message,
            raw,
        })
    }
}

fn default_required() -> Vec<String> {
    ["phone", "email", "zip"]
        .into_iter()
        .map(String::from)
        .collect()
}
