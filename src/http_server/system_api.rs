//! banner and health check
use actix_web::{get, web, HttpResponse};
use chrono::{SecondsFormat, Utc};

use crate::entity::dto::{BannerDto, HealthDto};
use crate::service::state_projector::StateProjector;
use crate::error;

const LOG_TAG: &str = "system_api";
const SERVICE_NAME: &str = "Smart Lighting API";

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(BannerDto {
        service: SERVICE_NAME.to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

#[get("/healthz")]
pub async fn healthz(state: web::Data<StateProjector>) -> HttpResponse {
    match state.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthDto { status: "ok".to_string(), error: None }),
        Err(e) => {
            error!(LOG_TAG, "health check failed: {}", e);
            HttpResponse::InternalServerError().json(HealthDto { status: "fail".to_string(), error: Some(e.msg) })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::http_server::server::build_app;
    use crate::http_server::server::test_support::test_data;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn test_banner() {
        let app = test::init_service(build_app(test_data().await)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: BannerDto = test::read_body_json(resp).await;
        assert_eq!(body.service, "Smart Lighting API");
        assert!(body.time.ends_with('Z'));
    }

    #[actix_web::test]
    async fn test_healthz() {
        let app = test::init_service(build_app(test_data().await)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: HealthDto = test::read_body_json(resp).await;
        assert_eq!(body.status, "ok");
        assert!(body.error.is_none());
    }
}
