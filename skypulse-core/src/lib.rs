//! Core library for the SkyPulse VN weather and air-quality dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The fetch pipeline: prompt, extract, normalize, validate, cite
//! - Shared domain models (weather record, air quality, forecast)
//! - Headless dashboard state used by front ends
//!
//! It is used by `skypulse-cli`, but can also be reused by other front ends.

pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod location;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod shell;
pub mod sources;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use credentials::{CredentialProvider, StaticCredentials};
pub use error::FetchError;
pub use location::{DEFAULT_CITY, LocationQuery, PRESET_CITIES};
pub use model::{
    AirQuality, Alert, AlertSeverity, AqiLevel, AqiStatus, ForecastDay, HourlyPoint,
    SourceCitation, WeatherRecord, WeatherReport,
};
pub use provider::{WeatherProvider, gemini::GeminiProvider, provider_from_config};
pub use shell::{Dashboard, FetchTicket, View};
