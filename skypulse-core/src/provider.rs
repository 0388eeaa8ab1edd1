use crate::{
    Config, FetchError, LocationQuery, WeatherRecord, WeatherReport, extract, normalize,
    provider::gemini::GeminiProvider, validate,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod gemini;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One request, one fresh report. No state is kept between calls.
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReport, FetchError>;
}

/// Turn raw model output into a validated record: extract, normalize, validate.
pub fn parse_record(text: &str) -> Result<WeatherRecord, FetchError> {
    let value = extract::parse_embedded_json(text)?;
    let value = normalize::normalize(value)?;
    validate::validate(value)
}

/// Construct the provider described by `config`.
///
/// A missing key is not an error here; it surfaces as [`FetchError::Config`]
/// on the first fetch, before anything is sent.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(GeminiProvider::from_config(config))
}
