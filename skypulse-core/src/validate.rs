//! Strict schema check between the normalized JSON and [`WeatherRecord`].
//!
//! Required scalars must be present and numeric, status labels must be one of
//! the enumerated values, and numbers must be in a plausible range. Anything
//! else is a [`FetchError::MalformedResponse`] rather than a half-filled record.

use serde_json::Value;

use crate::{FetchError, model::WeatherRecord};

/// Deserialize and range-check a normalized response object.
pub fn validate(value: Value) -> Result<WeatherRecord, FetchError> {
    let record: WeatherRecord = serde_json::from_value(value)
        .map_err(|e| FetchError::MalformedResponse(format!("unexpected response shape: {e}")))?;

    check_ranges(&record)?;
    Ok(record)
}

/// Range checks on an already-typed record.
pub fn check_ranges(record: &WeatherRecord) -> Result<(), FetchError> {
    if record.location.trim().is_empty() {
        return Err(invalid("location", "must not be empty"));
    }

    percentage("humidity", record.humidity)?;
    percentage("rainProbability", record.rain_probability)?;
    non_negative("windSpeed", record.wind_speed)?;
    non_negative("uvIndex", record.uv_index)?;
    non_negative("visibility", record.visibility)?;
    non_negative("airQuality.pm25", record.air_quality.pm25)?;
    non_negative("airQuality.pm10", record.air_quality.pm10)?;
    finite("temperature", record.temperature)?;
    finite("feelsLike", record.feels_like)?;

    for (i, point) in record.hourly.iter().enumerate() {
        finite(&format!("hourly[{i}].temp"), point.temp)?;
    }

    for (i, day) in record.forecast.iter().enumerate() {
        percentage(&format!("forecast[{i}].rainChance"), day.rain_chance)?;
        if day.high < day.low {
            return Err(invalid(
                &format!("forecast[{i}]"),
                &format!("high {} is below low {}", day.high, day.low),
            ));
        }
    }

    Ok(())
}

fn percentage(field: &str, value: f64) -> Result<(), FetchError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, &format!("{value} is outside 0..=100")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), FetchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("{value} must be non-negative")))
    }
}

fn finite(field: &str, value: f64) -> Result<(), FetchError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number"))
    }
}

fn invalid(field: &str, reason: &str) -> FetchError {
    FetchError::MalformedResponse(format!("field `{field}`: {reason}"))
}
