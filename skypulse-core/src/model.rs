use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, de};

/// Format of `lastUpdated` as requested from the service.
pub const LAST_UPDATED_FORMAT: &str = "%H:%M %d/%m/%Y";

/// Normalized weather and air-quality snapshot for one location.
///
/// Field names follow the JSON template sent in the prompt (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub location: String,
    pub temperature: f64,
    pub condition: String,
    pub description: String,
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    pub rain_probability: f64,
    pub uv_index: f64,
    /// km
    pub visibility: f64,
    pub feels_like: f64,
    pub air_quality: AirQuality,
    pub hourly: Vec<HourlyPoint>,
    pub forecast: Vec<ForecastDay>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    pub last_updated: String,
}

impl WeatherRecord {
    /// Parse `last_updated` ("HH:mm DD/MM/YYYY"). The service is free-form, so this may fail.
    pub fn last_updated_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.last_updated.trim(), LAST_UPDATED_FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQuality {
    #[serde(deserialize_with = "integral_aqi")]
    pub aqi: u32,
    /// µg/m³
    pub pm25: f64,
    /// µg/m³
    pub pm10: f64,
    pub status: AqiStatus,
    pub primary_pollutant: String,
    pub recommendation: String,
}

/// Air-quality status label. Serialized with the Vietnamese labels the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiStatus {
    #[serde(rename = "Tốt", alias = "Good")]
    Good,
    #[serde(rename = "Trung bình", alias = "Moderate")]
    Moderate,
    #[serde(rename = "Kém", alias = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitive,
    #[serde(rename = "Xấu", alias = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Rất xấu", alias = "Very Unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "Nguy hại", alias = "Hazardous")]
    Hazardous,
}

impl AqiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Tốt",
            Self::Moderate => "Trung bình",
            Self::UnhealthyForSensitive => "Kém",
            Self::Unhealthy => "Xấu",
            Self::VeryUnhealthy => "Rất xấu",
            Self::Hazardous => "Nguy hại",
        }
    }
}

impl std::fmt::Display for AqiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Accept `55` and `55.0`; reject fractional, negative and out-of-range values.
fn integral_aqi<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(de::Error::custom(format!("field `aqi`: {value} is not a non-negative integer")))
    }
}

/// Colour band for a numeric AQI, independent of the label the service chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    Severe,
}

impl AqiLevel {
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitive,
            151..=200 => Self::Unhealthy,
            _ => Self::Severe,
        }
    }

    /// Hex colour used by the dashboard charts.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::Good => "#10b981",
            Self::Moderate => "#f59e0b",
            Self::UnhealthyForSensitive => "#f97316",
            Self::Unhealthy => "#ef4444",
            Self::Severe => "#a855f7",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: String,
    pub temp: f64,
    #[serde(deserialize_with = "integral_aqi")]
    pub aqi: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub day: String,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub rain_chance: f64,
    #[serde(deserialize_with = "integral_aqi")]
    pub aqi: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: AlertSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    #[serde(rename = "Thông tin", alias = "Info")]
    Info,
    #[serde(rename = "Cảnh báo", alias = "Warning")]
    Warning,
    #[serde(rename = "Nguy hiểm", alias = "Danger")]
    Danger,
    #[serde(rename = "Khẩn cấp", alias = "Emergency")]
    Emergency,
}

impl AlertSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Thông tin",
            Self::Warning => "Cảnh báo",
            Self::Danger => "Nguy hiểm",
            Self::Emergency => "Khẩn cấp",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A page the service claims it grounded its answer on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub uri: String,
}

/// Result of one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub record: WeatherRecord,
    pub sources: Vec<SourceCitation>,
}
