//! Tagged result of one remote call attempt.

/// Result of a single call against a remote campaign service.
///
/// Exactly one of three disjoint surfaces, never conflated:
///
/// - [`Outcome::Invalid`]: local validation rejected the form; the request
///   never reached the network. Fully recoverable: correct the form and
///   resubmit.
/// - [`Outcome::Fault`]: transport or protocol failure. Surfaced as-is and
///   never retried automatically.
/// - [`Outcome::Completed`]: the remote system processed the request. The
///   carried result may still describe a business-level failure; interpreting
///   it is the caller's job.
#[derive(Debug)]
pub enum Outcome<T, F> {
    /// Local validation errors, in the order the rules were checked.
    Invalid(Vec<String>),
    /// Network or protocol failure.
    Fault(F),
    /// The remote system answered; inspect the carried result.
    Completed(T),
}

impl<T, F> Outcome<T, F> {
    /// True unless local validation rejected the form.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// True when local validation rejected the form.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Validation error messages; empty unless the outcome is [`Outcome::Invalid`].
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }

    /// True when the call failed at the transport or protocol level.
    #[must_use]
    pub const fn has_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// The transport fault, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&F> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// The remote result, if the call completed.
    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        match self {
            Self::Completed(result) => Some(result),
            _ => None,
        }
    }
}
