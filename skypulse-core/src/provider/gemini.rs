use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    Config, FetchError, LocationQuery, WeatherReport,
    credentials::{CredentialProvider, StaticCredentials},
    prompt::{GENERATION_TEMPERATURE, build_prompt},
    sources::{GroundingChunk, collect_sources},
};

use super::{WeatherProvider, parse_record};

/// Gemini `generateContent` with Google Search grounding.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    credentials: Arc<dyn CredentialProvider>,
    model: String,
    endpoint: String,
    http: Client,
}

impl GeminiProvider {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(StaticCredentials::from_config(config)),
            config.model.clone(),
            config.endpoint.clone(),
        )
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<GenerateResponse, FetchError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "google_search": {} }],
            "generationConfig": { "temperature": GENERATION_TEMPERATURE },
        });

        let res = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // The URL carries host, port and model name; keep it out of the classification.
                FetchError::classify_upstream(format!(
                    "Failed to send request to Gemini: {}",
                    e.without_url()
                ))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            FetchError::UpstreamUnavailable(format!("Failed to read Gemini response body: {e}"))
        })?;

        tracing::debug!(%status, bytes = body.len(), "gemini response received");

        if !status.is_success() {
            return Err(FetchError::classify_upstream(format!(
                "Gemini request failed with status {}: {}",
                status,
                error_detail(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::MalformedResponse(format!("Failed to parse Gemini response envelope: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for GeminiProvider {
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReport, FetchError> {
        let api_key = self.credentials.api_key()?;
        let location = query.resolve();

        tracing::debug!(%location, model = %self.model, "requesting weather");

        let response = self.generate(&api_key, &build_prompt(&location)).await.inspect_err(|e| {
            tracing::warn!(%location, error = %e, "weather request failed");
        })?;

        let candidate = response.candidates.into_iter().next().ok_or(FetchError::EmptyResult)?;
        let text = candidate.text();
        if text.trim().is_empty() {
            return Err(FetchError::EmptyResult);
        }

        let record = parse_record(&text).inspect_err(|e| {
            tracing::warn!(%location, error = %e, "could not use weather response");
        })?;

        let chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();
        let sources = collect_sources(&chunks);

        tracing::info!(
            location = %record.location,
            hourly = record.hourly.len(),
            forecast = record.forecast.len(),
            sources = sources.len(),
            "weather report ready"
        );

        Ok(WeatherReport { record, sources })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

impl Candidate {
    fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Prefer the API's own error message; fall back to the truncated raw body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) if !env.error.message.is_empty() => env.error.message,
        _ => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint_and_model() {
        let provider = GeminiProvider::new(
            Arc::new(StaticCredentials::new("k")),
            "gemini-2.5-flash",
            "http://localhost:1234/",
        );
        assert_eq!(
            provider.url(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn candidate_text_concatenates_parts() {
        let candidate: Candidate = serde_json::from_str(
            r#"{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"},{"inlineData":{}}]}}"#,
        )
        .unwrap();
        assert_eq!(candidate.text(), "{\"a\":1}");
    }

    #[test]
    fn error_detail_prefers_api_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_detail(body), "API key not valid.");
        assert_eq!(error_detail("<html>oops</html>"), "<html>oops</html>");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "ư".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
