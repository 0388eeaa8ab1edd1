//! Fixtures shared by unit tests.

use serde_json::{Value, json};

use crate::model::WeatherRecord;

pub fn sample_json() -> Value {
    json!({
        "location": "Đà Nẵng",
        "temperature": 29.5,
        "condition": "Nắng nhẹ",
        "description": "Trời nắng, có mây rải rác",
        "humidity": 72,
        "windSpeed": 14,
        "rainProbability": 20,
        "uvIndex": 7,
        "visibility": 10,
        "feelsLike": 33,
        "airQuality": {
            "aqi": 58,
            "pm25": 17.4,
            "pm10": 31,
            "status": "Trung bình",
            "primaryPollutant": "PM2.5",
            "recommendation": "Nhóm nhạy cảm nên hạn chế vận động mạnh ngoài trời."
        },
        "hourly": [
            {"time": "06:00", "temp": 25, "aqi": 45},
            {"time": "09:00", "temp": 28, "aqi": 52},
            {"time": "12:00", "temp": 31, "aqi": 60},
            {"time": "15:00", "temp": 32, "aqi": 63},
            {"time": "18:00", "temp": 29, "aqi": 58},
            {"time": "21:00", "temp": 27, "aqi": 50},
            {"time": "00:00", "temp": 26, "aqi": 44}
        ],
        "forecast": [
            {"day": "Thứ Hai", "high": 32, "low": 24, "condition": "Nắng", "rainChance": 10, "aqi": 55},
            {"day": "Thứ Ba", "high": 31, "low": 25, "condition": "Mưa rào", "rainChance": 60, "aqi": 48},
            {"day": "Thứ Tư", "high": 30, "low": 24, "condition": "Nhiều mây", "rainChance": 35, "aqi": 50}
        ],
        "alerts": [
            {"type": "Tia UV", "severity": "Cảnh báo", "message": "Chỉ số UV cao vào buổi trưa."}
        ],
        "lastUpdated": "14:30 18/10/2026"
    })
}

pub fn sample_record() -> WeatherRecord {
    serde_json::from_value(sample_json()).expect("fixture matches WeatherRecord")
}
