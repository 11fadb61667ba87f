//! Clients for the NGP online services.
//!
//! Three SOAP integrations share one shape: merge caller values over a typed
//! default schema, validate required fields and wire formats, serialize a
//! fixed-structure payload, perform one credentialed call and classify the
//! result.
//!
//! - [`DonationClient`] - credit-card contributions (`PostVerisignTransaction`)
//! - [`EmailSignupClient`] - email list signups (`EmailSignUp`)
//! - [`VolunteerClient`] - volunteer signups (`VolunteerSignUp`)
//!
//! Every call returns an [`Outcome`](crate::outcome::Outcome): local
//! validation errors, a transport fault, or the parsed vendor result for the
//! caller to interpret.
//!
//! # Example
//!
//! ```ignore
//! use campaignkit::config::Config;
//! use campaignkit::ngp::{Contact, DonationClient, DonationForm};
//!
//! let config = Config::load()?;
//! let client = DonationClient::new(&config.ngp)?;
//! let outcome = client.save(&DonationForm {
//!     contact: Contact {
//!         first_name: "John".into(),
//!         last_name: "Doe".into(),
//!         ..Contact::default()
//!     },
//!     ..DonationForm::default()
//! }).await;
//! ```

mod contact;
mod donation;
mod email;
mod volunteer;

pub use contact::Contact;
pub use donation::{
    Contribution, DonationClient, DonationForm, DonationOutcome, Payment, RecurringPeriod,
    RecurringPeriodError, TransactionResult,
};
pub use email::{EmailSignupClient, SignupForm, SignupOutcome};
pub use volunteer::{Interest, VolunteerClient, VolunteerForm, VolunteerOutcome, VolunteerResult};

/// Namespace qualifying NGP SOAP operations; also the `SOAPAction` prefix.
pub const NGP_NAMESPACE: &str = "https://services.myngp.com/ngponlineservices/";
