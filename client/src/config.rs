use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with CK_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ngp: NgpConfig,
    #[serde(default)]
    pub revmsg: RevMsgConfig,
}

/// Settings for the NGP online services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NgpConfig {
    /// Contribution and email signup service endpoint.
    #[serde(default = "default_contribution_url")]
    pub contribution_url: String,

    /// Volunteer signup service endpoint.
    #[serde(default = "default_volunteer_url")]
    pub volunteer_url: String,

    /// Encrypted credentials string (required — no compiled-in default).
    #[serde(default)]
    pub credentials: String,

    /// Notify the contributor by email after an accepted donation.
    #[serde(default)]
    pub send_email: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_ngp_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings for the Revolution Messaging subscriber list API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevMsgConfig {
    /// API base URL.
    #[serde(default = "default_revmsg_api_url")]
    pub api_url: String,

    /// Subscriber list UUID (required — no compiled-in default).
    #[serde(default)]
    pub list_uuid: String,

    /// Request timeout in seconds.
    #[serde(default = "default_revmsg_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_contribution_url() -> String {
    "https://services.myngp.com/ngponlineservices/onlinecontribservice.asmx".to_string()
}

fn default_volunteer_url() -> String {
    "https://services.myngp.com/ngponlineservices/VolunteerSignUpService.asmx".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_ngp_timeout_secs() -> u64 {
    30
}

fn default_revmsg_api_url() -> String {
    "https://api.revmsg.net/json/v1".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_revmsg_timeout_secs() -> u64 {
    5
}

impl Default for NgpConfig {
    fn default() -> Self {
        Self {
            contribution_url: default_contribution_url(),
            volunteer_url: default_volunteer_url(),
            credentials: String::new(),
            send_email: false,
            timeout_secs: default_ngp_timeout_secs(),
        }
    }
}

impl Default for RevMsgConfig {
    fn default() -> Self {
        Self {
            api_url: default_revmsg_api_url(),
            list_uuid: String::new(),
            timeout_secs: default_revmsg_timeout_secs(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with CK_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file("config.yaml"))
            .merge(Env::prefixed("CK_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("CK_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NGP credentials are required
        if self.ngp.credentials.is_empty() {
            return Err(ConfigError::Validation(
                "ngp.credentials is required. Set CK_NGP__CREDENTIALS environment variable or configure in config.yaml.".into(),
            ));
        }

        // Subscriber list UUID is required
        if self.revmsg.list_uuid.is_empty() {
            return Err(ConfigError::Validation(
                "revmsg.list_uuid is required. Set CK_REVMSG__LIST_UUID environment variable or configure in config.yaml.".into(),
            ));
        }

        // Endpoints must be http(s) URLs
        for (name, url) in [
            ("ngp.contribution_url", &self.ngp.contribution_url),
            ("ngp.volunteer_url", &self.ngp.volunteer_url),
            ("revmsg.api_url", &self.revmsg.api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{name} contains invalid URL '{url}'. Must start with http:// or https://"
                )));
            }
        }

        // Timeouts must be non-zero
        if self.ngp.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "ngp.timeout_secs cannot be 0".into(),
            ));
        }
        if self.revmsg.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "revmsg.timeout_secs cannot be 0".into(),
            ));
        }

        Ok(())
    }
}
