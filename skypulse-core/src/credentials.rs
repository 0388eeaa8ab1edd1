//! Credential lookup, injected into providers instead of read ad hoc.

use std::fmt::Debug;

use crate::{Config, FetchError};

/// Value a mis-configured build tool leaves behind instead of a key.
const PLACEHOLDER_KEY: &str = "undefined";

/// Supplies the API key for each request.
pub trait CredentialProvider: Send + Sync + Debug {
    /// Return a usable key or [`FetchError::Config`].
    fn api_key(&self) -> Result<String, FetchError>;
}

/// Reject absent, blank and placeholder keys.
pub fn check_api_key(key: Option<&str>) -> Result<String, FetchError> {
    match key.map(str::trim) {
        Some(k) if !k.is_empty() && k != PLACEHOLDER_KEY => Ok(k.to_string()),
        _ => Err(FetchError::missing_api_key()),
    }
}

/// A key fixed at construction time. Validated on every use, so a placeholder
/// fails the same way a missing key does.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: Some(key.into()) }
    }

    pub fn missing() -> Self {
        Self { key: None }
    }

    /// Credentials from a loaded [`Config`] (env override already applied).
    pub fn from_config(config: &Config) -> Self {
        Self { key: config.api_key().map(str::to_owned) }
    }

    pub fn is_configured(&self) -> bool {
        check_api_key(self.key.as_deref()).is_ok()
    }
}

impl Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Result<String, FetchError> {
        check_api_key(self.key.as_deref())
    }
}
