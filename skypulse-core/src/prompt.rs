//! Prompt sent to the text-generation service.
//!
//! The JSON template is the contract with the service: key names and types
//! here must match [`crate::model::WeatherRecord`].

/// Sampling temperature; kept low so the JSON layout stays stable.
pub const GENERATION_TEMPERATURE: f64 = 0.1;

const RESPONSE_TEMPLATE: &str = r#"{
  "location": "Tên thành phố chính xác",
  "temperature": số (độ C),
  "condition": "Trạng thái thời tiết bằng tiếng Việt",
  "description": "Mô tả ngắn gọn",
  "humidity": số (%),
  "windSpeed": số (km/h),
  "rainProbability": số (%),
  "uvIndex": số,
  "visibility": số (km),
  "feelsLike": số (độ C),
  "airQuality": {
    "aqi": số nguyên (chỉ số AQI thực tế),
    "pm25": số (µg/m³),
    "pm10": số (µg/m³),
    "status": "Tốt/Trung bình/Kém/Xấu/Rất xấu/Nguy hại",
    "primaryPollutant": "PM2.5",
    "recommendation": "Lời khuyên sức khỏe cụ thể"
  },
  "hourly": [
    {"time": "06:00", "temp": số, "aqi": số nguyên},
    {"time": "09:00", "temp": số, "aqi": số nguyên},
    {"time": "12:00", "temp": số, "aqi": số nguyên},
    {"time": "15:00", "temp": số, "aqi": số nguyên},
    {"time": "18:00", "temp": số, "aqi": số nguyên},
    {"time": "21:00", "temp": số, "aqi": số nguyên},
    {"time": "00:00", "temp": số, "aqi": số nguyên}
  ],
  "forecast": [
    {"day": "Thứ...", "high": số, "low": số, "condition": "Trạng thái", "rainChance": số, "aqi": số nguyên}
  ],
  "alerts": [
    {"type": "Loại cảnh báo", "severity": "Thông tin/Cảnh báo/Nguy hiểm/Khẩn cấp", "message": "Nội dung"}
  ],
  "lastUpdated": "HH:mm DD/MM/YYYY"
}"#;

/// Build the instruction for `location` (already resolved, see [`crate::LocationQuery::resolve`]).
pub fn build_prompt(location: &str) -> String {
    format!(
        "Cung cấp dữ liệu thời tiết thực tế và chất lượng không khí (AQI) cho địa điểm: {location}.\n\
         Yêu cầu dữ liệu chính xác nhất từ các nguồn tin cậy như Google Search, OpenWeather, IQAir.\n\
         Dự báo 3 ngày tới trong \"forecast\". \"alerts\" để trống nếu không có cảnh báo.\n\
         \n\
         Định dạng JSON yêu cầu (BẮT BUỘC):\n\
         {RESPONSE_TEMPLATE}\n"
    )
}
