//! Splash-page gate: cookie bookkeeping and redirect decisions.
//!
//! First-time visitors get redirected to a splash page; a flag cookie marks
//! the splash as seen so later visits proceed straight through, and a second
//! cookie remembers where the visitor was originally headed. Everything here
//! is a pure function over `Cookie`/`Set-Cookie` header strings; the caller
//! owns the actual header transport.

use chrono::{Duration, Utc};

/// Cookie name under which the visitor's entrance path is stored.
pub const ENTRANCE_COOKIE: &str = "splash-entrance";

/// Default days before the gate cookies expire.
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

/// Build a `Set-Cookie` value with a percent-encoded payload and a GMT
/// expiry `expiry_days` from now.
#[must_use]
pub fn build_cookie(
    name: &str,
    value: &str,
    expiry_days: i64,
    path: Option<&str>,
    domain: Option<&str>,
) -> String {
    let expires = (Utc::now() + Duration::days(expiry_days)).format("%a, %d %b %Y %H:%M:%S GMT");
    let mut cookie = format!("{}={}; expires={}", name, urlencoding::encode(value), expires);
    if let Some(path) = path {
        cookie.push_str("; path=");
        cookie.push_str(path);
    }
    if let Some(domain) = domain {
        cookie.push_str("; domain=");
        cookie.push_str(domain);
    }
    cookie
}

/// Find `name` in a `Cookie` request header and return its decoded value.
#[must_use]
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')))
        .map(|raw| {
            urlencoding::decode(raw).map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
        })
}

/// What an arriving visitor should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// The seen-flag cookie is present; continue to the requested page.
    Proceed,
    /// First visit: remember where the visitor was headed and send them to
    /// the splash page.
    Redirect {
        location: String,
        set_cookie: String,
    },
}

/// Result of resolving the splash page's continue link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueAction {
    /// `Set-Cookie` value marking the splash as seen.
    pub set_cookie: String,
    /// Where the continue link should point: the stored entrance path, or
    /// `/` when none was recorded.
    pub continue_url: String,
}

/// Decides whether visitors should be routed through a splash page.
#[derive(Debug, Clone)]
pub struct SplashGate {
    cookie_name: String,
    splash_url: String,
    expiry_days: i64,
}

impl SplashGate {
    /// Create a gate keyed on `cookie_name`, redirecting first-time visitors
    /// to `splash_url`. Cookies expire after [`DEFAULT_EXPIRY_DAYS`].
    pub fn new(cookie_name: impl Into<String>, splash_url: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            splash_url: splash_url.into(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    /// Override the cookie lifetime.
    #[must_use]
    pub const fn with_expiry_days(mut self, days: i64) -> Self {
        self.expiry_days = days;
        self
    }

    /// Decide for a visitor arriving at `current_path` with the given
    /// `Cookie` header.
    #[must_use]
    pub fn entry_action(&self, cookie_header: &str, current_path: &str) -> EntryAction {
        if read_cookie(cookie_header, &self.cookie_name).is_some() {
            EntryAction::Proceed
        } else {
            EntryAction::Redirect {
                location: self.splash_url.clone(),
                set_cookie: build_cookie(
                    ENTRANCE_COOKIE,
                    current_path,
                    self.expiry_days,
                    None,
                    None,
                ),
            }
        }
    }

    /// On the splash page: mark the splash as seen and resolve where the
    /// continue link should point.
    #[must_use]
    pub fn continue_action(&self, cookie_header: &str) -> ContinueAction {
        let continue_url =
            read_cookie(cookie_header, ENTRANCE_COOKIE).unwrap_or_else(|| "/".to_string());
        ContinueAction {
            set_cookie: build_cookie(&self.cookie_name, "true", self.expiry_days, None, None),
            continue_url,
        }
    }
}
