//! lenient field extraction from request bodies
use serde_json::{Map, Value};

use crate::common::error::ServiceError;

/// parse a request body into a json object, anything else is treated as empty
pub fn parse_body(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// read a string field, absent or null gives `default`
pub fn get_str(data: &Map<String, Value>, value_name: &'static str, default: &str) -> Result<String, ServiceError> {
    Ok(get_opt_str(data, value_name)?.unwrap_or_else(|| default.to_string()))
}

/// read an optional string field, a non-string value is an error
pub fn get_opt_str(data: &Map<String, Value>, value_name: &'static str) -> Result<Option<String>, ServiceError> {
    match data.get(value_name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ServiceError::invalid_field(value_name, format!("{} must be a string", value_name))),
    }
}

/// coerce a json value to an integer: integers, floats (truncated), numeric strings and booleans as 1/0
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// read an integer field, absent gives `default`
pub fn get_int(data: &Map<String, Value>, value_name: &'static str, default: i64) -> Result<i64, ServiceError> {
    match data.get(value_name) {
        None => Ok(default),
        Some(value) => as_int(value)
            .ok_or_else(|| ServiceError::invalid_field(value_name, format!("{} must be integer 0-100", value_name))),
    }
}

/// truthiness of a json value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
