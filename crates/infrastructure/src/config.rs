//! Suite configuration.
//!
//! Values come from the environment and fall back to the public
//! objects API.

use thiserror::Error;
use url::Url;

/// Default address of the objects API.
pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev";

/// Environment variable overriding the base address.
pub const BASE_URL_VAR: &str = "CRUDCHECK_BASE_URL";
/// Environment variable overriding the `User-Agent` header.
pub const USER_AGENT_VAR: &str = "CRUDCHECK_USER_AGENT";
/// Environment variable holding the tracing filter directive.
pub const LOG_VAR: &str = "CRUDCHECK_LOG";

/// Error type for configuration loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base address is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Configuration for one suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Base address without a trailing slash.
    pub base_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Tracing filter directive, e.g. `info` or `crudcheck=debug`.
    pub log_filter: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            log_filter: "info".to_string(),
        }
    }
}

impl SuiteConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `CRUDCHECK_BASE_URL` is not a valid http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = non_blank(BASE_URL_VAR).unwrap_or(defaults.base_url);

        Ok(Self {
            base_url: validate_base_url(&base_url)?,
            user_agent: non_blank(USER_AGENT_VAR).unwrap_or(defaults.user_agent),
            log_filter: non_blank(LOG_VAR).unwrap_or(defaults.log_filter),
        })
    }

    /// Overrides the base address.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a valid http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_base_url(base_url)?;
        Ok(self)
    }
}

fn default_user_agent() -> String {
    format!("crudcheck/{}", env!("CARGO_PKG_VERSION"))
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
