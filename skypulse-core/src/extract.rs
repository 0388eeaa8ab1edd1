//! Locate and parse the JSON object embedded in free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::FetchError;

// First `{` through the last `}`, across newlines.
static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"));

/// Return the greedy `{...}` span of `text`, if any.
pub fn extract_json_span(text: &str) -> Option<&str> {
    JSON_SPAN.find(text).map(|m| m.as_str())
}

/// Extract and parse the embedded JSON document.
///
/// The model may wrap its answer in commentary or Markdown fences; both are
/// ignored. A missing span or a syntax error is [`FetchError::MalformedResponse`].
pub fn parse_embedded_json(text: &str) -> Result<Value, FetchError> {
    let span = extract_json_span(text).ok_or_else(|| {
        FetchError::MalformedResponse("no JSON object found in response text".to_string())
    })?;

    serde_json::from_str(span)
        .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON in response: {e}")))
}
