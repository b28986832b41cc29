//! field checks applied before any write reaches the store
//! failures come back as `ServiceError` values, never panics
use serde_json::{Map, Value};

use crate::common::error::ServiceError;
use crate::entity::dto::{AlarmQueryDto, LedStateDto, NewAlarmDto, NewRoutineDto};
use crate::entity::po::Actions;
use crate::util::json::{get_int, get_opt_str, get_str, is_truthy};

const ALARM_TIME_LEN: usize = 5;

fn check_percent(value: i64, value_name: &'static str) -> Result<i64, ServiceError> {
    if (0..=100).contains(&value) {
        Ok(value)
    } else {
        Err(ServiceError::invalid_field(value_name, format!("{} must be 0-100", value_name)))
    }
}

/// `POST /led`, status is not restricted to on/off
pub fn validate_led(data: &Map<String, Value>) -> Result<LedStateDto, ServiceError> {
    let defaults = LedStateDto::default();
    let brightness = get_int(data, "brightness", defaults.brightness)?;
    Ok(LedStateDto {
        status: get_str(data, "status", defaults.status.as_str())?,
        color: get_str(data, "color", defaults.color.as_str())?,
        brightness: check_percent(brightness, "brightness")?,
    })
}

/// `POST /music/play`, returns the mode
pub fn validate_play(data: &Map<String, Value>) -> Result<String, ServiceError> {
    get_str(data, "mode", "classic")
}

/// `POST /music/volume`
pub fn validate_volume(data: &Map<String, Value>) -> Result<i64, ServiceError> {
    let volume = get_int(data, "volume", 80)?;
    check_percent(volume, "volume")
}

/// `POST /alarm`, any 5 character time passes
pub fn validate_alarm(data: &Map<String, Value>) -> Result<NewAlarmDto, ServiceError> {
    let status = match data.get("status") {
        Some(Value::String(s)) if s == "on" || s == "off" => s.clone(),
        _ => return Err(ServiceError::invalid_field("status", "status must be 'on' or 'off'")),
    };
    let time = match data.get("time") {
        Some(Value::String(t)) if t.chars().count() == ALARM_TIME_LEN => t.clone(),
        _ => return Err(ServiceError::invalid_field("time", "time must be 'HH:MM'")),
    };
    Ok(NewAlarmDto { status, time })
}

/// normalize `GET /alarm` filters, a status other than on/off is ignored
pub fn alarm_filter(query: &AlarmQueryDto) -> (Option<String>, Option<String>) {
    let status = query.status.clone().filter(|s| s == "on" || s == "off");
    let time = query.time.clone().filter(|t| !t.is_empty());
    (status, time)
}

/// `POST /routine`
pub fn validate_routine(data: &Map<String, Value>) -> Result<NewRoutineDto, ServiceError> {
    let name = get_opt_str(data, "name")?.unwrap_or_default();
    let time = get_opt_str(data, "time")?.unwrap_or_default();
    let enabled = data.get("enabled").map(is_truthy).unwrap_or(true);
    let actions: Actions = match data.get("actions") {
        None | Some(Value::Null) => Actions::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => return Err(ServiceError::invalid_field("actions", "actions must be an object")),
    };
    check_routine(NewRoutineDto { name, time, enabled, actions })
}

/// name and time must be non-empty, shared by create and import
pub fn check_routine(routine: NewRoutineDto) -> Result<NewRoutineDto, ServiceError> {
    if routine.name.is_empty() || routine.time.is_empty() {
        return Err(ServiceError::missing_field("name and time are required"));
    }
    Ok(routine)
}
