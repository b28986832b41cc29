use actix_web::{delete, get, post, web, HttpResponse};

use super::server::{path_id, rejected};
use crate::common::error::ServiceError;
use crate::entity::dto::{DeletedDto, RoutineDto};
use crate::service::state_projector::StateProjector;
use crate::service::validator;
use crate::util::json::parse_body;
use crate::info;

const LOG_TAG: &str = "routine_api";

#[get("/routine")]
pub async fn get_routines(state: web::Data<StateProjector>) -> Result<HttpResponse, ServiceError> {
    let routines = state.list_routines().await?;
    Ok(HttpResponse::Ok().json(routines))
}

#[post("/routine")]
pub async fn post_routine(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let routine = validator::validate_routine(&parse_body(&body)).map_err(rejected)?;
    let po = state.routine_dao().insert(routine).await?;
    info!(LOG_TAG, "routine created, id: {} name: {}", po.id, po.name);
    Ok(HttpResponse::Created().json(RoutineDto::from(po)))
}

#[delete("/routine/{id}")]
pub async fn delete_routine(state: web::Data<StateProjector>, path: web::Path<u64>) -> Result<HttpResponse, ServiceError> {
    let id = path_id(path.into_inner())?;
    let removed = state.routine_dao().delete(id).await?;
    info!(LOG_TAG, "routine delete, id: {} removed: {}", id, removed);
    Ok(HttpResponse::Ok().json(DeletedDto { deleted: id }))
}
