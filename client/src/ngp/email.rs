//! Email list signup client (`EmailSignUp` operation).
//!
//! The smallest of the NGP integrations: four contact slots sent as direct
//! operation arguments alongside the credentials, answered by a plain
//! boolean.

use std::sync::Arc;
use std::time::Duration;

use super::NGP_NAMESPACE;
use crate::config::NgpConfig;
use crate::outcome::Outcome;
use crate::payload::{element_text, PayloadWriter};
use crate::soap::{HttpSoapTransport, SoapError, SoapTransport};

const OPERATION: &str = "EmailSignUp";

/// Signup details. Wire names are lower camel case on this service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub zip: String,
}

impl SignupForm {
    /// Whether the slot named by `field` is unset. Unknown names count as
    /// unset so a misconfigured required list fails closed.
    fn is_blank(&self, field: &str) -> bool {
        match field {
            "lastName" => self.last_name.is_empty(),
            "firstName" => self.first_name.is_empty(),
            "email" => self.email.is_empty(),
            "zip" => self.zip.is_empty(),
            _ => true,
        }
    }
}

/// Result of one `save` attempt; the completed value is the service's
/// boolean acceptance flag.
pub type SignupOutcome = Outcome<bool, SoapError>;

/// Client for the NGP email signup service.
///
/// No fields are required out of the box; configure the list with
/// [`EmailSignupClient::set_required_fields`] to taste.
pub struct EmailSignupClient {
    transport: Arc<dyn SoapTransport>,
    credentials: String,
    required: Vec<String>,
}

impl EmailSignupClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &NgpConfig) -> Result<Self, SoapError> {
        let transport = HttpSoapTransport::new(
            config.contribution_url.clone(),
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
            required: Vec::new(),
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
    pub fn validate(&self, form: &SignupForm) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| form.is_blank(field))
            .map(|field| format!("{field} is required"))
            .collect()
    }

    /// Submit the signup. The completed value is the service's acceptance
    /// flag.
    pub async fn save(&self, form: &SignupForm) -> SignupOutcome {
        let errors = self.validate(form);
        if !errors.is_empty() {
            return Outcome::Invalid(errors);
        }

        let mut body = PayloadWriter::new();
        body.element("lastName", &form.last_name);
        body.element("firstName", &form.first_name);
        body.element("email", &form.email);
        body.element("zip", &form.zip);
        body.element("credentials", &self.credentials);

        match self.transport.call(OPERATION, body.finish()).await {
            Ok(envelope) => match element_text(&envelope, "EmailSignUpResult") {
                Some(flag) => Outcome::Completed(flag == "true"),
                None => Outcome::Fault(SoapError::Malformed(
                    "missing EmailSignUpResult".into(),
                )),
            },
            Err(e) => Outcome::Fault(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::mock::MockSoapTransport;

    fn form() -> SignupForm {
        SignupForm {
            last_name: "Doe".into(),
            first_name: "John".into(),
            email: "john.doe@example.com".into(),
            zip: "12345".into(),
        }
    }

    fn envelope(flag: &str) -> String {
        format!(
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body><EmailSignUpResponse>\
             <EmailSignUpResult>{flag}</EmailSignUpResult>\
             </EmailSignUpResponse></soap:Body></soap:Envelope>"
        )
    }

    #[test]
    fn no_fields_are_required_by_default() {
        let c = EmailSignupClient::with_transport(Arc::new(MockSoapTransport::new()), "creds");
        assert!(c.validate(&SignupForm::default()).is_empty());
    }

    #[test]
    fn configured_required_fields_are_enforced_in_order() {
        let mut c = EmailSignupClient::with_transport(Arc::new(MockSoapTransport::new()), "creds");
        c.set_required_fields(["email", "zip"]);

        let errors = c.validate(&SignupForm::default());
        assert_eq!(errors, ["email is required", "zip is required"]);
        assert!(c.validate(&form()).is_empty());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_transport() {
        let transport = Arc::new(MockSoapTransport::new());
        let mut c = EmailSignupClient::with_transport(transport.clone(), "creds");
        c.set_required_fields(["email"]);

        let outcome = c.save(&SignupForm::default()).await;

        assert_eq!(outcome.errors(), ["email is required".to_string()]);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn save_sends_fields_and_credentials_as_direct_arguments() {
        let transport = Arc::new(MockSoapTransport::new());
        transport.set_result(Ok(envelope("true")));
        let c = EmailSignupClient::with_transport(transport.clone(), "creds");

        let outcome = c.save(&form()).await;

        assert_eq!(outcome.result(), Some(&true));
        let (operation, body) = transport.calls().remove(0);
        assert_eq!(operation, "EmailSignUp");
        assert_eq!(
            body,
            "<lastName>Doe</lastName><firstName>John</firstName>\
             <email>john.doe@example.com</email><zip>12345</zip>\
             <credentials>creds</credentials>"
        );
    }

    #[tokio::test]
    async fn rejected_signup_completes_false() {
        let transport = Arc::new(MockSoapTransport::new());
        transport.set_result(Ok(envelope("false")));
        let c = EmailSignupClient::with_transport(transport, "creds");

        assert_eq!(c.save(&form()).await.result(), Some(&false));
    }

    #[tokio::test]
    async fn missing_result_element_is_malformed() {
        let transport = Arc::new(MockSoapTransport::new());
        transport.set_result(Ok("<soap:Envelope><soap:Body/></soap:Envelope>".into()));
        let c = EmailSignupClient::with_transport(transport, "creds");

        let outcome = c.save(&form()).await;
        assert!(matches!(outcome.fault(), Some(SoapError::Malformed(_))));
    }
}
