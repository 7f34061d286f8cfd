use std::fmt;
use std::path::Path;

use parse_types::constants::{API_ENDPOINT, API_VERSION};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SdkError, SdkResult};

/// Environment variables read by [`ParseConfig::with_env_overrides`].
pub mod env_vars {
    pub const APPLICATION_ID: &str = "PARSE_APPLICATION_ID";
    pub const CLIENT_KEY: &str = "PARSE_CLIENT_KEY";
    pub const API_ENDPOINT: &str = "PARSE_API_ENDPOINT";
}

/// The application id and client key sent with every request.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub application_id: String,
    pub client_key: String,
}

impl Credentials {
    pub fn new(application_id: impl Into<String>, client_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            client_key: client_key.into(),
        }
    }
}

// The client key stays out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("application_id", &self.application_id)
            .field("client_key", &"<redacted>")
            .finish()
    }
}

/// Client configuration.
///
/// ```toml
/// application_id = "myAppId"
/// client_key = "myClientKey"
/// api_endpoint = "https://api.parse.com"   # optional
/// api_version = "1"                        # optional
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub application_id: String,
    pub client_key: String,
    /// Base URL of the REST API, without a trailing slash.
    pub api_endpoint: String,
    pub api_version: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            application_id: String::new(),
            client_key: String::new(),
            api_endpoint: API_ENDPOINT.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }
}

impl fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseConfig")
            .field("application_id", &self.application_id)
            .field("client_key", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl ParseConfig {
    /// A configuration for the hosted API with the given credentials.
    pub fn new(application_id: impl Into<String>, client_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            client_key: client_key.into(),
            ..Default::default()
        }
    }

    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(
            credentials.application_id.clone(),
            credentials.client_key.clone(),
        )
    }

    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading client configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Override fields from the `PARSE_*` environment variables that are set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Override fields from `lookup`, keyed by the names in [`env_vars`].
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(env_vars::APPLICATION_ID) {
            self.application_id = v;
        }
        if let Some(v) = lookup(env_vars::CLIENT_KEY) {
            self.client_key = v;
        }
        if let Some(v) = lookup(env_vars::API_ENDPOINT) {
            self.api_endpoint = v;
        }
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.application_id.clone(), self.client_key.clone())
    }

    /// Check that both credentials are present and the endpoint is usable.
    pub fn validate(&self) -> SdkResult<()> {
        if self.application_id.is_empty() {
            return Err(SdkError::MissingCredential("application_id"));
        }
        if self.client_key.is_empty() {
            return Err(SdkError::MissingCredential("client_key"));
        }
        if !(self.api_endpoint.starts_with("https://") || self.api_endpoint.starts_with("http://")) {
            return Err(SdkError::InvalidConfig(format!(
                "api_endpoint must be an http(s) URL, got {:?}",
                self.api_endpoint
            )));
        }
        if self.api_version.is_empty() {
            return Err(SdkError::InvalidConfig("api_version is empty".into()));
        }
        Ok(())
    }

    /// Store these credentials in the process-wide holder.
    pub fn install_global(&self) {
        crate::global::initialize(self.application_id.clone(), self.client_key.clone());
    }
}
