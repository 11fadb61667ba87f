//! Volunteer signup client (`VolunteerSignUp` operation).
//!
//! Sends contact details plus any number of interest codes; the service
//! answers with a result document whose `successMsg` is `"0"` on acceptance.

use std::sync::Arc;
use std::time::Duration;

use super::{Contact, NGP_NAMESPACE};
use crate::config::NgpConfig;
use crate::outcome::Outcome;
use crate::payload::{element_text, PayloadWriter};
use crate::soap::{HttpSoapTransport, SoapError, SoapTransport};

const OPERATION: &str = "VolunteerSignUp";

/// One volunteer interest: a vendor code and an optional free-text note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    pub code: u32,
    pub note: String,
}

/// One volunteer signup: contact details plus interest codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerForm {
    pub contact: Contact,
    pub interests: Vec<Interest>,
}

impl VolunteerForm {
    /// Record an interest code with a note.
    pub fn add_interest(&mut self, code: u32, note: impl Into<String>) {
        self.interests.push(Interest {
            code,
            note: note.into(),
        });
    }
}

/// Parsed signup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerResult {
    /// The service's status string; `"0"` means accepted.
    pub success_msg: String,
    /// The full result document, for callers that need more detail.
    pub raw: String,
}

impl VolunteerResult {
    /// The service's literal success contract: `successMsg` of `"0"`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.success_msg == "0"
    }
}

/// Result of one `save` attempt.
pub type VolunteerOutcome = Outcome<VolunteerResult, SoapError>;

/// Client for the NGP volunteer signup service.
pub struct VolunteerClient {
    transport: Arc<dyn SoapTransport>,
    credentials: String,
    required: Vec<String>,
}

impl VolunteerClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &NgpConfig) -> Result<Self, SoapError> {
        let transport = HttpSoapTransport::new(
            config.volunteer_url.clone(),
            NGP_NAMESPACE,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.credentials.clone(),
        ))
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(
        transport: Arc<dyn SoapTransport>,
        credentials: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials: credentials.into(),
            required: default_required(),
        }
    }

    /// Replace the required-field list. Names are case-sensitive wire names.
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

    /// Check the form against the required-field list.
    #[must_use]
    pub fn validate(&self, form: &VolunteerForm) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| form.contact.is_blank(field).unwrap_or(true))
            .map(|field| format!("{field} is required"))
            .collect()
    }

    /// Submit the signup.
    pub async fn save(&self, form: &VolunteerForm) -> VolunteerOutcome {
        let errors = self.validate(form);
        if !errors.is_empty() {
            return Outcome::Invalid(errors);
        }

        let mut body = PayloadWriter::new();
        body.element("credentials", &self.credentials);
        body.element("data", &payload(form));

        match self.transport.call(OPERATION, body.finish()).await {
            Ok(envelope) => match parse_result(&envelope) {
                Ok(result) => Outcome::Completed(result),
                Err(e) => Outcome::Fault(e),
            },
            Err(e) => Outcome::Fault(e),
        }
    }
}

fn default_required() -> Vec<String> {
    ["FirstName", "LastName", "Email", "Address1", "Zip"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Serialize the signup document: contact section plus one block per
/// interest code.
fn payload(form: &VolunteerForm) -> String {
    let mut w = PayloadWriter::new();
    w.open("VolunteerSignUp");
    w.open("ContactInfo");
    form.contact.write_elements(&mut w);
    w.close("ContactInfo");
    for interest in &form.interests {
        w.open("VolunteerInfo");
        w.element("Code", &interest.code.to_string());
        w.element("Note", &interest.note);
        w.close("VolunteerInfo");
    }
    w.close("VolunteerSignUp");
    w.finish()
}

fn parse_result(envelope: &str) -> Result<VolunteerResult, SoapError> {
    let raw = element_text(envelope, "VolunteerSignUpResult")
        .ok_or_else(|| SoapError::Malformed("missing VolunteerSignUpResult".into()))?;
    let success_msg = element_text(&raw, "successMsg")
        .ok_or_else(|| SoapError::Malformed("missing successMsg".into()))?;
    Ok(VolunteerResult { success_msg, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::mock::MockSoapTransport;

    fn form() -> VolunteerForm {
        let mut form = VolunteerForm {
            contact: Contact {
                first_name: "John".into(),
                last_name: "Doe".into(),
                email: "john.doe@example.com".into(),
                address1: "100 Elm Street".into(),
                zip: "12345".into(),
                ..Contact::default()
            },
            ..VolunteerForm::default()
        };
        form.add_interest(101, "Weekends only");
        form
    }

    fn result_envelope(success_msg: &str) -> String {
        let inner = format!("<result><successMsg>{success_msg}</successMsg></result>");
        let mut w = PayloadWriter::new();
        w.element("VolunteerSignUpResult", &inner);
        format!(
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body><VolunteerSignUpResponse>{}</VolunteerSignUpResponse>\
             </soap:Body></soap:Envelope>",
            w.finish()
        )
    }

    #[test]
    fn default_required_fields_are_enforced() {
        let c = VolunteerClient::with_transport(Arc::new(MockSoapTransport::new()), "creds");
        let errors = c.validate(&VolunteerForm::default());
        assert_eq!(
            errors,
            [
                "FirstName is required",
                "LastName is required",
                "Email is required",
                "Address1 is required",
                "Zip is required",
            ]
        );
        assert!(c.validate(&form()).is_empty());
    }

    #[test]
    fn payload_carries_contact_and_interest_blocks() {
        let xml = payload(&form());
        assert!(xml.starts_with("<VolunteerSignUp><ContactInfo><LastName>Doe</LastName>"));
        assert!(xml.contains(
            "<VolunteerInfo><Code>101</Code><Note>Weekends only</Note></VolunteerInfo>"
        ));
        assert!(xml.ends_with("</VolunteerSignUp>"));
    }

    #[test]
    fn interests_serialize_in_insertion_order() {
        let mut f = form();
        f.add_interest(7, "");
        let xml = payload(&f);
        let first = xml.find("<Code>101</Code>").expect("first interest");
        let second = xml.find("<Code>7</Code>").expect("second interest");
        assert!(first < second);
        assert!(xml.contains("<Code>7</Code><Note/>"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_transport() {
        let transport = Arc::new(MockSoapTransport::new());
        let c = VolunteerClient::with_transport(transport.clone(), "creds");

        let outcome = c.save(&VolunteerForm::default()).await;

        assert!(outcome.has_errors());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn accepted_signup_reports_success() {
        let transport = Arc::new(MockSoapTransport::new());
        transport.set_result(Ok(result_envelope("0")));
        let c = VolunteerClient::with_transport(transport.clone(), "creds");

        let outcome = c.save(&form()).await;

        let result = outcome.result().expect("completed");
        assert!(result.is_accepted());

        let (operation, body) = transport.calls().remove(0);
        assert_eq!(operation, "VolunteerSignUp");
        assert!(body.starts_with("<credentials>creds</credentials><data>"));
    }

    #[tokio::test]
    async fn nonzero_success_msg_is_a_business_result() {
        let transport = Arc::new(MockSoapTransport::new());
        transport.set_result(Ok(result_envelope("3")));
        let c = VolunteerClient::with_transport(transport, "creds");

        let outcome = c.save(&form()).await;

        let result = outcome.result().expect("completed");
        assert!(!result.is_accepted());
        assert_eq!(result.success_msg, "3");
    }
}
