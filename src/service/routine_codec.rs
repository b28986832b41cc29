//! qr token export/import of a routine
//!
//! A token is the routine document `{id, name, time, enabled, actions}` as
//! UTF-8 json, encoded with the url-safe base64 alphabet and no padding.
//! Decoding also accepts padded tokens. The `id` inside a token is carried for
//! reference only: an import always produces a new routine with a fresh id.

use data_encoding::BASE64URL_NOPAD;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::error::ServiceError;
use crate::entity::dto::NewRoutineDto;
use crate::entity::po::{Actions, RoutinePo};

const DEFAULT_NAME: &str = "Imported";
const DEFAULT_TIME: &str = "00:00";

#[derive(Serialize)]
struct ExportPayload<'a> {
    id: i64,
    name: &'a str,
    time: &'a str,
    enabled: bool,
    actions: &'a Actions,
}

#[derive(Deserialize)]
struct ImportPayload {
    // ignored, a new id is minted on insert
    #[serde(default)]
    #[allow(dead_code)]
    id: Option<Value>,
    name: Option<String>,
    time: Option<String>,
    enabled: Option<bool>,
    actions: Option<Actions>,
}

/// routine to token
pub fn encode(routine: &RoutinePo) -> Result<String, ServiceError> {
    let payload = ExportPayload {
        id: routine.id,
        name: routine.name.as_str(),
        time: routine.time.as_str(),
        enabled: routine.enabled,
        actions: &routine.actions,
    };
    let json = serde_json::to_string(&payload)
        .map_err(|e| ServiceError::internal(format!("cannot serialize routine {}: {e}", routine.id)))?;
    Ok(BASE64URL_NOPAD.encode(json.as_bytes()))
}

/// token to a routine ready for insertion, absent fields take their defaults
pub fn decode(token: &str) -> Result<NewRoutineDto, ServiceError> {
    let trimmed = token.trim().trim_end_matches('=');
    let bytes = BASE64URL_NOPAD.decode(trimmed.as_bytes()).map_err(ServiceError::invalid_token)?;
    let text = String::from_utf8(bytes).map_err(ServiceError::invalid_token)?;
    let payload: ImportPayload = serde_json::from_str(text.as_str()).map_err(ServiceError::invalid_token)?;

    Ok(NewRoutineDto {
        name: payload.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        time: payload.time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
        enabled: payload.enabled.unwrap_or(true),
        actions: payload.actions.unwrap_or_default(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::error::ErrorCode;
    use chrono::Utc;
    use data_encoding::BASE64URL;
    use serde_json::json;

    fn routine() -> RoutinePo {
        RoutinePo {
            id: 7,
            name: "아침 루틴".into(),
            time: "06:45".into(),
            enabled: false,
            actions: json!({"led": {"color": "#FFAA00", "brightness": 40}, "music": {"mode": "classic"}})
                .as_object().unwrap().clone(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip_drops_id() {
        let po = routine();
        let token = encode(&po).unwrap();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

        let decoded = decode(token.as_str()).unwrap();
        assert_eq!(decoded.name, po.name);
        assert_eq!(decoded.time, po.time);
        assert_eq!(decoded.enabled, po.enabled);
        assert_eq!(decoded.actions, po.actions);
    }

    #[test]
    fn test_token_carries_id() {
        let token = encode(&routine()).unwrap();
        let bytes = BASE64URL_NOPAD.decode(token.as_bytes()).unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc["id"], json!(7));
        assert_eq!(doc["name"], json!("아침 루틴"));
    }

    #[test]
    fn test_padded_token_accepted() {
        let padded = BASE64URL.encode(br#"{"name":"pad","time":"01:02"}"#);
        assert!(padded.ends_with('='));
        let decoded = decode(padded.as_str()).unwrap();
        assert_eq!(decoded.name, "pad");
    }

    #[test]
    fn test_defaults() {
        let token = BASE64URL_NOPAD.encode(b"{}");
        let decoded = decode(token.as_str()).unwrap();
        assert_eq!(decoded.name, "Imported");
        assert_eq!(decoded.time, "00:00");
        assert!(decoded.enabled);
        assert!(decoded.actions.is_empty());
    }

    #[test]
    fn test_invalid_tokens() {
        let not_base64 = decode("this is not a token!").unwrap_err();
        assert_eq!(not_base64.code, ErrorCode::InvalidToken);
        assert!(not_base64.msg.starts_with("invalid qr_code: "));

        let not_json = decode(BASE64URL_NOPAD.encode(b"hello").as_str()).unwrap_err();
        assert_eq!(not_json.code, ErrorCode::InvalidToken);

        let not_object = decode(BASE64URL_NOPAD.encode(b"[1,2]").as_str()).unwrap_err();
        assert_eq!(not_object.code, ErrorCode::InvalidToken);

        let not_utf8 = decode(BASE64URL_NOPAD.encode(&[0xff, 0xfe, 0xfd]).as_str()).unwrap_err();
        assert_eq!(not_utf8.code, ErrorCode::InvalidToken);
    }
}
