//! Plain-text rendering of dashboard state.

use std::fmt;

use chrono::{Local, NaiveDateTime};
use skypulse_core::{AqiLevel, SourceCitation, View, WeatherRecord};

const BAR_WIDTH: usize = 20;

pub fn render_view(view: &View<'_>) -> String {
    match view {
        View::Idle => "Nothing loaded yet.\n".to_string(),
        View::Loading { location } => format!("Loading weather for {location}...\n"),
        View::Error { message, needs_setup } => {
            let mut out = format!("Error: {message}\n");
            if *needs_setup {
                out.push_str(
                    "\nSetup:\n  1. Get a key from https://aistudio.google.com/apikey\n  \
                     2. export API_KEY=<key> (or put it in .env)\n  \
                     3. or run `skypulse configure`\n",
                );
            }
            out
        }
        View::Ready { weather, sources, refreshing } => {
            let mut out = render_record(weather, sources);
            if *refreshing {
                out.push_str("(refreshing...)\n");
            }
            out
        }
    }
}

pub fn render_record(w: &WeatherRecord, sources: &[SourceCitation]) -> String {
    RecordText { record: w, sources, now: Local::now().naive_local() }.to_string()
}

/// Text layout of one report.
struct RecordText<'a> {
    record: &'a WeatherRecord,
    sources: &'a [SourceCitation],
    now: NaiveDateTime,
}

impl fmt::Display for RecordText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.record;
        let aq = &w.air_quality;

        writeln!(f, "{}  (updated {})", w.location, updated_label(w, self.now))?;
        writeln!(
            f,
            "{:.0}°C, feels like {:.0}°C  {}",
            w.temperature, w.feels_like, w.condition
        )?;
        writeln!(f, "{}", w.description)?;
        writeln!(
            f,
            "Humidity {:.0}%  Wind {:.0} km/h  Rain {:.0}%  UV {:.0}  Visibility {:.0} km",
            w.humidity, w.wind_speed, w.rain_probability, w.uv_index, w.visibility
        )?;
        writeln!(
            f,
            "\nAir quality: AQI {} ({}, {})  PM2.5 {:.1}  PM10 {:.1}  main: {}",
            aq.aqi,
            aq.status,
            AqiLevel::from_aqi(aq.aqi).color_hex(),
            aq.pm25,
            aq.pm10,
            aq.primary_pollutant
        )?;
        writeln!(f, "  {}", aq.recommendation)?;

        if !w.alerts.is_empty() {
            writeln!(f, "\nAlerts:")?;
            for alert in &w.alerts {
                writeln!(f, "  [{}] {}: {}", alert.severity, alert.kind, alert.message)?;
            }
        }

        if !w.hourly.is_empty() {
            writeln!(f, "\nHourly:")?;
            let (min, max) = temp_range(w.hourly.iter().map(|h| h.temp));
            for point in &w.hourly {
                writeln!(
                    f,
                    "  {:>5}  {:>5.1}°C {:<width$}  AQI {}",
                    point.time,
                    point.temp,
                    bar(point.temp, min, max),
                    point.aqi,
                    width = BAR_WIDTH
                )?;
            }
        }

        if !w.forecast.is_empty() {
            writeln!(f, "\nForecast:")?;
            for day in &w.forecast {
                writeln!(
                    f,
                    "  {:<10} {:>3.0}°/{:<3.0}° {:<14} rain {:>3.0}%  AQI {}",
                    day.day, day.high, day.low, day.condition, day.rain_chance, day.aqi
                )?;
            }
        }

        if !self.sources.is_empty() {
            writeln!(f, "\nSources:")?;
            for source in self.sources {
                writeln!(f, "  {} <{}>", source.title, source.uri)?;
            }
        }

        Ok(())
    }
}

/// "14:30 18/10/2026, 25 min ago" when the timestamp parses, the raw text otherwise.
fn updated_label(w: &WeatherRecord, now: NaiveDateTime) -> String {
    match w.last_updated_at() {
        Some(at) if at <= now => {
            let minutes = (now - at).num_minutes();
            if minutes < 60 {
                format!("{}, {minutes} min ago", w.last_updated)
            } else {
                format!("{}, {} h ago", w.last_updated, minutes / 60)
            }
        }
        _ => w.last_updated.clone(),
    }
}

fn temp_range(temps: impl Iterator<Item = f64>) -> (f64, f64) {
    temps.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)))
}

fn bar(value: f64, min: f64, max: f64) -> String {
    let span = max - min;
    let filled = if span > 0.0 {
        (((value - min) / span) * (BAR_WIDTH - 1) as f64).round() as usize + 1
    } else {
        BAR_WIDTH / 2
    };
    "█".repeat(filled.min(BAR_WIDTH))
}
