//! Error taxonomy for a single weather fetch.

use thiserror::Error;

/// Everything that can go wrong between "user asked for a city" and
/// "a validated record is on screen".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Credential missing or still a placeholder. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream rejected the credential.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Weather service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// No JSON object in the response text, or it failed to parse or validate.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("The weather service returned no data")]
    EmptyResult,
}

impl FetchError {
    /// Build the error for a missing or placeholder API key.
    pub fn missing_api_key() -> Self {
        Self::Config(
            "API_KEY is not configured.\n\
             Hint: export API_KEY=<your Gemini key>, add it to a .env file, \
             or run `skypulse configure`."
                .to_string(),
        )
    }

    /// Classify a failed upstream call by its message.
    ///
    /// Messages mentioning HTTP 403 or "API key" are credential problems,
    /// everything else is treated as the service being unavailable.
    pub fn classify_upstream(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("403") || message.contains("API key") {
            Self::Auth(message)
        } else {
            Self::UpstreamUnavailable(message)
        }
    }

    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(msg) => msg.clone(),
            Self::Auth(_) => "API authentication failed. Check the API_KEY setting \
                              (environment, .env or `skypulse configure`)."
                .to_string(),
            Self::UpstreamUnavailable(_) => {
                "Could not reach the weather service. Please try again later.".to_string()
            }
            Self::MalformedResponse(_) => {
                "The returned data was not in the expected format. Please try again.".to_string()
            }
            Self::EmptyResult => "No data was returned for this location.".to_string(),
        }
    }

    /// Whether the user has to fix credentials before retrying makes sense.
    pub fn needs_setup(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Auth(_))
    }

    /// Nothing is retried automatically; recovery is always a manual re-fetch.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_403_as_auth() {
        let err = FetchError::classify_upstream("status 403 Forbidden: PERMISSION_DENIED");
        assert!(matches!(err, FetchError::Auth(_)));
    }

    #[test]
    fn classify_api_key_message_as_auth() {
        let err = FetchError::classify_upstream("API key not valid. Please pass a valid API key.");
        assert!(matches!(err, FetchError::Auth(_)));
    }

    #[test]
    fn classify_other_failures_as_unavailable() {
        for msg in ["connection refused", "status 500 Internal Server Error", "timed out"] {
            let err = FetchError::classify_upstream(msg);
            assert!(matches!(err, FetchError::UpstreamUnavailable(_)), "{msg}");
        }
    }

    #[test]
    fn config_error_carries_setup_instructions() {
        let err = FetchError::missing_api_key();
        assert!(err.needs_setup());
        assert!(err.user_message().contains("API_KEY"));
        assert!(err.user_message().contains("skypulse configure"));
    }

    #[test]
    fn nothing_is_retryable() {
        assert!(!FetchError::EmptyResult.is_retryable());
        assert!(!FetchError::UpstreamUnavailable("x".into()).is_retryable());
        assert!(FetchError::Auth("x".into()).needs_setup());
        assert!(!FetchError::MalformedResponse("x".into()).needs_setup());
    }
}
