use serde_json::{Map, Value};

use crate::FetchError;

const ARRAY_FIELDS: [&str; 3] = ["hourly", "forecast", "alerts"];

/// Guarantee the array fields exist.
///
/// `hourly`, `forecast` and `alerts` are set to `[]` when missing, `null`,
/// `false`, `0` or `""`.
/// Nothing else is touched, so running this twice is the same as running it once.
pub fn normalize(value: Value) -> Result<Value, FetchError> {
    let Value::Object(mut object) = value else {
        return Err(FetchError::MalformedResponse(
            "response JSON is not an object".to_string(),
        ));
    };

    ensure_arrays(&mut object);
    Ok(Value::Object(object))
}

fn ensure_arrays(object: &mut Map<String, Value>) {
    for field in ARRAY_FIELDS {
        let entry = object.entry(field).or_insert(Value::Null);
        if is_blank(entry) {
            *entry = Value::Array(Vec::new());
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
