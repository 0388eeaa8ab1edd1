use serde::{Deserialize, Serialize};

/// City used when a query names neither a city nor coordinates.
pub const DEFAULT_CITY: &str = "Hà Nội";

/// Shortcut cities offered by the dashboard.
pub const PRESET_CITIES: &[&str] = &[
    "Hà Nội",
    "Tp Hồ Chí Minh",
    "Đà Nẵng",
    "Huế",
    "Hải Phòng",
    "Hạ Long",
    "Cần Thơ",
    "Nha Trang",
    "Phú Quốc",
    "Quy Nhơn",
    "Hà Giang",
    "Hội An",
    "Đồng Hới",
    "Vinh",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the user asked for. Resolved to a single string for the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self { city: Some(name.into()), coordinates: None }
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self { city: None, coordinates: Some(Coordinates { latitude, longitude }) }
    }

    /// Build from optional parts; a coordinate pair needs both halves.
    pub fn from_parts(city: Option<String>, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let coordinates = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        };
        Self { city, coordinates }
    }

    /// Explicit city > "lat, lon" > [`DEFAULT_CITY`]. Blank city names count as absent.
    pub fn resolve(&self) -> String {
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            return city.to_string();
        }

        match self.coordinates {
            Some(Coordinates { latitude, longitude }) => format!("{latitude}, {longitude}"),
            None => DEFAULT_CITY.to_string(),
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_precedence() {
        let city = Some("Huế".to_string());
        let cases = [
            (city.clone(), Some(16.4), Some(107.5), "Huế"),
            (city.clone(), None, None, "Huế"),
            (city, Some(16.4), None, "Huế"),
            (None, Some(16.4), Some(107.5), "16.4, 107.5"),
            (None, Some(16.4), None, DEFAULT_CITY),
            (None, None, Some(107.5), DEFAULT_CITY),
            (None, None, None, DEFAULT_CITY),
        ];

        for (city, lat, lon, expected) in cases {
            let query = LocationQuery::from_parts(city.clone(), lat, lon);
            assert_eq!(query.resolve(), expected, "city={city:?} lat={lat:?} lon={lon:?}");
        }
    }

    #[test]
    fn blank_city_falls_through() {
        let query = LocationQuery::from_parts(Some("   ".into()), Some(10.0), Some(106.5));
        assert_eq!(query.resolve(), "10, 106.5");
    }

    #[test]
    fn city_is_trimmed() {
        assert_eq!(LocationQuery::city("  Vinh ").resolve(), "Vinh");
    }

    #[test]
    fn default_query_is_default_city() {
        assert_eq!(LocationQuery::default().to_string(), DEFAULT_CITY);
    }
}
