//! routine export to and import from qr tokens
use actix_web::{post, web, HttpResponse};
use serde_json::Value;

use super::server::rejected;
use crate::common::error::ServiceError;
use crate::entity::dto::{QrCodeDto, QrImportedDto, RoutineDto};
use crate::service::state_projector::StateProjector;
use crate::service::{routine_codec, validator};
use crate::util::json::{as_int, parse_body};
use crate::info;

const LOG_TAG: &str = "qr_api";

#[post("/qr/export")]
pub async fn qr_export(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let data = parse_body(&body);
    let routine_id = data.get("routine_id").and_then(as_int)
        .ok_or_else(|| rejected(ServiceError::not_found("routine not found")))?;
    let routine = state.find_routine(routine_id).await.map_err(rejected)?;
    let qr_code = routine_codec::encode(&routine)?;
    info!(LOG_TAG, "routine {} exported", routine.id);
    Ok(HttpResponse::Ok().json(QrCodeDto { qr_code }))
}

#[post("/qr/import")]
pub async fn qr_import(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let data = parse_body(&body);
    let token = match data.get("qr_code") {
        None | Some(Value::Null) => return Err(rejected(ServiceError::missing_field("qr_code required"))),
        Some(Value::String(s)) if s.is_empty() => return Err(rejected(ServiceError::missing_field("qr_code required"))),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(rejected(ServiceError::invalid_token(format!("expected a string, got {other}")))),
    };
    let routine = routine_codec::decode(token.as_str())
        .and_then(validator::check_routine)
        .map_err(rejected)?;
    let po = state.routine_dao().insert(routine).await?;
    info!(LOG_TAG, "routine imported as id: {}", po.id);
    Ok(HttpResponse::Created().json(QrImportedDto { imported: RoutineDto::from(po) }))
}
