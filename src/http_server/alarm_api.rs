use actix_web::{delete, get, post, web, HttpResponse};

use super::server::{path_id, rejected};
use crate::common::error::ServiceError;
use crate::entity::dto::{AlarmDto, AlarmQueryDto, DeletedDto};
use crate::service::state_projector::StateProjector;
use crate::service::validator;
use crate::util::json::parse_body;
use crate::info;

const LOG_TAG: &str = "alarm_api";

#[get("/alarm")]
pub async fn get_alarm_list(state: web::Data<StateProjector>, query: web::Query<Vec<(String, String)>>) -> Result<HttpResponse, ServiceError> {
    let query = AlarmQueryDto::from_pairs(&query);
    let (status, time) = validator::alarm_filter(&query);
    let alarms = state.list_alarms(status, time).await?;
    Ok(HttpResponse::Ok().json(alarms))
}

#[post("/alarm")]
pub async fn post_alarm(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let alarm = validator::validate_alarm(&parse_body(&body)).map_err(rejected)?;
    let po = state.alarm_dao().insert(alarm).await?;
    info!(LOG_TAG, "alarm created, id: {} time: {}", po.id, po.time);
    Ok(HttpResponse::Created().json(AlarmDto::from(po)))
}

/// deleting an unknown id still succeeds
#[delete("/alarm/{id}")]
pub async fn delete_alarm(state: web::Data<StateProjector>, path: web::Path<u64>) -> Result<HttpResponse, ServiceError> {
    let id = path_id(path.into_inner())?;
    let removed = state.alarm_dao().delete(id).await?;
    info!(LOG_TAG, "alarm delete, id: {} removed: {}", id, removed);
    Ok(HttpResponse::Ok().json(DeletedDto { deleted: id }))
}
