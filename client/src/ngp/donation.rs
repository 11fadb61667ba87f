//! Credit-card contribution client for the NGP online contribution service.
//!
//! One `save` call validates the form, serializes the
//! `PostVerisignTransaction` document and performs a single credentialed
//! SOAP call. The vendor's literal success contract is a result code of
//! zero; any other code is carried unexamined for the caller to interpret.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::{Contact, NGP_NAMESPACE};
use crate::config::NgpConfig;
use crate::outcome::Outcome;
use crate::payload::{element_text, PayloadWriter};
use crate::soap::{HttpSoapTransport, SoapError, SoapTransport};
use crate::validation::{
    validate_contribution_amount, validate_election_cycle, validate_expiration_month,
    validate_expiration_year, validate_recurring_term,
};

const OPERATION: &str = "PostVerisignTransaction";

/// Frequency code for recurring contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecurringPeriod {
    #[default]
    Monthly,
    Weekly,
    Biweekly,
    FourWeekly,
    Quarterly,
    SemiYearly,
    Yearly,
}

/// Error returned when a string is not a recognized recurring period code.
#[derive(Debug, Error)]
#[error("Invalid recurring period. Must be one of: MONT, WEEK, BIWK, FRWK, QTER, SMYR, YEAR.")]
pub struct RecurringPeriodError;

impl RecurringPeriod {
    /// The vendor's wire code for this period.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Monthly => "MONT",
            Self::Weekly => "WEEK",
            Self::Biweekly => "BIWK",
            Self::FourWeekly => "FRWK",
            Self::Quarterly => "QTER",
            Self::SemiYearly => "SMYR",
            Self::Yearly => "YEAR",
        }
    }
}

impl FromStr for RecurringPeriod {
    type Err = RecurringPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONT" => Ok(Self::Monthly),
            "WEEK" => Ok(Self::Weekly),
            "BIWK" => Ok(Self::Biweekly),
            "FRWK" => Ok(Self::FourWeekly),
            "QTER" => Ok(Self::Quarterly),
            "SMYR" => Ok(Self::SemiYearly),
            "YEAR" => Ok(Self::Yearly),
            _ => Err(RecurringPeriodError),
        }
    }
}

/// Contribution details.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    /// Election year the donation is for.
    pub cycle: Option<u16>,
    pub member: String,
    pub attribution: String,
    pub source: String,
    /// Election period code.
    pub period: String,
    /// Whether this contribution repeats.
    pub recurring: bool,
    pub recurring_note: String,
    /// Donation amount in dollars.
    pub amount: f64,
    pub account: String,
    pub attend: String,
    /// Frequency of recurring charges; serialized only when `recurring`.
    pub recurring_period: RecurringPeriod,
    /// Total number of recurring charges (1-24); serialized only when
    /// `recurring`.
    pub recurring_term: u8,
}

impl Default for Contribution {
    fn default() -> Self {
        Self {
            cycle: None,
            member: String::new(),
            attribution: String::new(),
            source: String::new(),
            period: "G".into(),
            recurring: false,
            recurring_note: String::new(),
            amount: 0.0,
            account: String::new(),
            attend: String::new(),
            recurring_period: RecurringPeriod::default(),
            recurring_term: 1,
        }
    }
}

/// Payment card details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payment {
    pub card_number: String,
    /// Two-digit expiration year.
    pub exp_year: String,
    /// Two-digit expiration month, `01`-`12`.
    pub exp_month: String,
    pub cvv: String,
}

/// One donation: contact, contribution and payment sections plus the
/// contributor-type slots specific to this service.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationForm {
    pub contact: Contact,
    /// Contributor type code; individual (`I`) unless overridden.
    pub main_type: String,
    pub organization: String,
    pub contribution: Contribution,
    pub payment: Payment,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self {
            contact: Contact::default(),
            main_type: "I".into(),
            organization: String::new(),
            contribution: Contribution::default(),
            payment: Payment::default(),
        }
    }
}

impl DonationForm {
    /// Whether the slot named by `field` is unset. Unknown names count as
    /// unset so a misconfigured required list fails closed.
    #[allow(clippy::float_cmp)]
    fn is_blank(&self, field: &str) -> bool {
        if let Some(blank) = self.contact.is_blank(field) {
            return blank;
        }
        let c = &self.contribution;
        let p = &self.payment;
        match field {
            "MainType" => self.main_type.is_empty(),
            "Organization" => self.organization.is_empty(),
            "Cycle" => c.cycle.is_none(),
            "Member" => c.member.is_empty(),
            "Attribution" => c.attribution.is_empty(),
            "Source" => c.source.is_empty(),
            "Period" => c.period.is_empty(),
            "RecurringContrib" => !c.recurring,
            "RecurringContribNote" => c.recurring_note.is_empty(),
            "Amount" => c.amount == 0.0,
            "Account" => c.account.is_empty(),
            "Attend" => c.attend.is_empty(),
            "RecurringPeriod" => false,
            "RecurringTerm" => c.recurring_term == 0,
            "CreditCardNumber" => p.card_number.is_empty(),
            "ExpYear" => p.exp_year.is_empty(),
            "ExpMonth" => p.exp_month.is_empty(),
            "CVV" => p.cvv.is_empty(),
            _ => true,
        }
    }
}

/// Parsed vendor result for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    /// Vendor status code; zero means the transaction was accepted.
    pub code: i32,
    /// Status description from the vendor.
    pub message: String,
    /// The full result document, for callers that need more detail.
    pub raw: String,
}

impl TransactionResult {
    /// The vendor's literal success contract: result code zero.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.code == 0
    }
}

/// Result of one `save` attempt.
pub type DonationOutcome = Outcome<TransactionResult, SoapError>;

/// Client for the NGP online contribution service.
pub struct DonationClient {
    transport: Arc<dyn SoapTransport>,
    credentials: String,
    send_email: bool,
    required: Vec<String>,
}

impl DonationClient {
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
            config.send_email,
        ))
    }

    /// Create a client over an explicit transport (for testing, or custom
    /// HTTP setups).
    pub fn with_transport(
        transport: Arc<dyn SoapTransport>,
        credentials: impl Into<String>,
        send_email: bool,
    ) -> Self {
        Self {
            transport,
            credentials: credentials.into(),
            send_email,
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

    /// Check the form against the required-field list and the wire format
    /// rules. All violated rules are reported together, in check order.
    #[must_use]
    pub fn validate(&self, form: &DonationForm) -> Vec<String> {
        let mut errors = Vec::new();

        for field in &self.required {
            if form.is_blank(field) {
                errors.push(format!("{field} is required"));
            }
        }

        let c = &form.contribution;
        if c.recurring_term != 0 && validate_recurring_term(c.recurring_term).is_err() {
            errors.push("Invalid recurring term. Must be a number 1-24.".to_string());
        }

        let p = &form.payment;
        if !p.exp_month.is_empty() && validate_expiration_month(&p.exp_month).is_err() {
            errors.push("Invalid Expiration Month. Must be a two-digit number 01-12.".to_string());
        }
        if !p.exp_year.is_empty() && validate_expiration_year(&p.exp_year).is_err() {
            errors.push("Invalid Expiration Year. Must be a two-digit number 00-99.".to_string());
        }

        if let Some(cycle) = c.cycle {
            if validate_election_cycle(cycle).is_err() {
                errors.push("Invalid cycle. Must be four-digit year.".to_string());
            }
        }

        if validate_contribution_amount(c.amount).is_err() {
            errors
                .push("Invalid contribution amount. Must be greater than or equal to 1.".to_string());
        }

        errors
    }

    /// Submit the donation.
    ///
    /// Validation failure stops before the network; a transport fault is
    /// surfaced as-is; otherwise the parsed vendor result is returned for the
    /// caller to interpret (zero means accepted).
    pub async fn save(&self, form: &DonationForm) -> DonationOutcome {
        let errors = self.validate(form);
        if !errors.is_empty() {
            return Outcome::Invalid(errors);
        }

        let mut body = PayloadWriter::new();
        body.element("credentials", &self.credentials);
        body.element("data", &payload(form));
        body.flag("sendEmail", self.send_email);

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
    [
        "FirstName",
        "LastName",
        "Address1",
        "Zip",
        "Cycle",
        "Amount",
        "CreditCardNumber",
        "ExpYear",
        "ExpMonth",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Serialize the transaction document: contact, contribution and payment
/// sections in fixed wire order.
#[allow(clippy::float_cmp)]
fn payload(form: &DonationForm) -> String {
    let mut w = PayloadWriter::new();
    w.open("PostVerisignTransaction");

    w.open("ContactInfo");
    form.contact.write_elements(&mut w);
    w.element("MainType", &form.main_type);
    w.element("Organization", &form.organization);
    w.close("ContactInfo");

    let c = &form.contribution;
    w.open("ContributionInfo");
    w.element(
        "Cycle",
        &c.cycle.map(|year| year.to_string()).unwrap_or_default(),
    );
    w.element("Member", &c.member);
    w.element("Attribution", &c.attribution);
    w.element("Source", &c.source);
    w.element("Period", &c.period);
    w.flag("RecurringContrib", c.recurring);
    w.element("RecurringContribNote", &c.recurring_note);
    let amount = if c.amount == 0.0 {
        String::new()
    } else {
        c.amount.to_string()
    };
    w.element("Amount", &amount);
    w.element("Account", &c.account);
    w.element("Attend", &c.attend);
    // Recurring slots are governed by the flag: skipped entirely rather than
    // emitted empty.
    if c.recurring {
        w.element("RecurringPeriod", c.recurring_period.code());
        w.element("RecurringTerm", &c.recurring_term.to_string());
    }
    w.close("ContributionInfo");

    let p = &form.payment;
    w.open("VerisignInfo");
    w.element("CreditCardNumber", &p.card_number);
    w.element("ExpYear", &p.exp_year);
    w.element("ExpMonth", &p.exp_month);
    w.element("CVV", &p.cvv);
    w.close("VerisignInfo");

    w.close("PostVerisignTransaction");
    w.finish()
}

fn parse_result(envelope: &str) -> Result<TransactionResult, SoapError> {
    let raw = element_text(envelope, "PostVerisignTransactionResult")
        .ok_or_else(|| SoapError::Malformed("missing PostVerisignTransactionResult".into()))?;
    let code = element_text(&raw, "Result")
        .and_then(|text| text.parse::<i32>().ok())
        .ok_or_else(|| SoapError::Malformed("missing VendorResult/Result".into()))?;
    let message = element_text(&raw, "Message").unwrap_or_default();
    Ok(TransactionResult { code, message, raw })
}
