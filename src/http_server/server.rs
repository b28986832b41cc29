//! http server: app assembly, routing and fallbacks
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{middleware, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;

use super::{alarm_api, led_api, music_api, qr_api, routine_api, system_api};
use crate::common::error::ServiceError;
use crate::common::setting::Settings;
use crate::service::state_projector::StateProjector;
use crate::{info, warn};

const LOG_TAG: &str = "http_server";

/// register every endpoint
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(system_api::index)
        .service(system_api::healthz)
        .service(led_api::get_led)
        .service(led_api::post_led)
        .service(music_api::get_music)
        .service(music_api::play_music)
        .service(music_api::stop_music)
        .service(music_api::set_music_volume)
        .service(alarm_api::get_alarm_list)
        .service(alarm_api::post_alarm)
        .service(alarm_api::delete_alarm)
        .service(routine_api::get_routines)
        .service(routine_api::post_routine)
        .service(routine_api::delete_routine)
        .service(qr_api::qr_export)
        .service(qr_api::qr_import);
}

fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// preflight requests succeed on any path, everything else unmatched is a 404
async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }
    HttpResponse::NotFound().json(json!({"error": "not found"}))
}

/// log a rejected request and hand the error back for the response
pub(crate) fn rejected(e: ServiceError) -> ServiceError {
    warn!(LOG_TAG, "request rejected: {}", e);
    e
}

/// ids in paths are non-negative integers, anything else is an unmatched route
pub(crate) fn path_id(id: u64) -> Result<i64, ServiceError> {
    i64::try_from(id).map_err(|_| ServiceError::not_found("not found"))
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|e, req| {
        warn!(LOG_TAG, "unmatched path {}: {}", req.path(), e);
        ServiceError::not_found("not found").into()
    })
}

pub fn build_app(
    projector: web::Data<StateProjector>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    App::new()
        .app_data(projector)
        .app_data(path_config())
        .wrap(cors_headers())
        .wrap(middleware::Logger::default())
        .configure(configure)
        .default_service(web::to(fallback))
}

/// run until the process is stopped
pub async fn run(settings: &Settings, projector: StateProjector) -> std::io::Result<()> {
    let data = web::Data::new(projector);
    let bind = (settings.web.web_host.clone(), settings.web.web_port);
    info!(LOG_TAG, "http server listening on {}:{}", bind.0, bind.1);
    HttpServer::new(move || build_app(data.clone()))
        .bind(bind)?
        .run()
        .await
}


#[cfg(test)]
mod test {
    use super::test_support::test_data;
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn test_unmatched_route() {
        let app = test::init_service(build_app(test_data().await)).await;
        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not found");
    }

    #[actix_web::test]
    async fn test_cors() {
        let app = test::init_service(build_app(test_data().await)).await;
        let req = test::TestRequest::default().method(Method::OPTIONS).uri("/led").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");

        let req = test::TestRequest::get().uri("/led").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
    }
}
