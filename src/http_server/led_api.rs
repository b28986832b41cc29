use actix_web::{get, post, web, HttpResponse};

use super::server::rejected;
use crate::common::error::ServiceError;
use crate::service::state_projector::StateProjector;
use crate::service::validator;
use crate::util::json::parse_body;
use crate::info;

const LOG_TAG: &str = "led_api";

#[get("/led")]
pub async fn get_led(state: web::Data<StateProjector>) -> Result<HttpResponse, ServiceError> {
    let led = state.current_led().await?;
    Ok(HttpResponse::Ok().json(led))
}

#[post("/led")]
pub async fn post_led(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let data = parse_body(&body);
    let led = validator::validate_led(&data).map_err(rejected)?;
    let po = state.led_dao().insert(led.clone()).await?;
    info!(LOG_TAG, "led state set, id: {} status: {} brightness: {}", po.id, po.status, po.brightness);
    Ok(HttpResponse::Created().json(led))
}

#[cfg(test)]
mod test {
    use crate::entity::dto::LedStateDto;
    use crate::http_server::server::build_app;
    use crate::http_server::server::test_support::test_data;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_default_led() {
        let app = test::init_service(build_app(test_data().await)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/led").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: LedStateDto = test::read_body_json(resp).await;
        assert_eq!(body, LedStateDto { status: "off".into(), color: "#FFFFFF".into(), brightness: 100 });
    }

    #[actix_web::test]
    async fn test_set_then_get() {
        let app = test::init_service(build_app(test_data().await)).await;
        for b in [0, 37, 100] {
            let req = test::TestRequest::post().uri("/led")
                .set_json(json!({"status": "on", "color": "#FF00FF", "brightness": b}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let resp = test::call_service(&app, test::TestRequest::get().uri("/led").to_request()).await;
            let body: LedStateDto = test::read_body_json(resp).await;
            assert_eq!(body.brightness, b);
            assert_eq!(body.color, "#FF00FF");
            assert_eq!(body.status, "on");
        }
    }

    #[actix_web::test]
    async fn test_invalid_brightness_keeps_state() {
        let data = test_data().await;
        let app = test::init_service(build_app(data.clone())).await;
        let req = test::TestRequest::post().uri("/led").set_json(json!({"brightness": 55})).to_request();
        test::call_service(&app, req).await;

        for bad in [json!(-1), json!(101), json!("loud")] {
            let req = test::TestRequest::post().uri("/led").set_json(json!({"brightness": bad})).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert!(body["error"].as_str().unwrap().contains("brightness"));
        }

        assert_eq!(data.led_dao().count().await.unwrap(), 1);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/led").to_request()).await;
        let body: LedStateDto = test::read_body_json(resp).await;
        assert_eq!(body.brightness, 55);
    }

    #[actix_web::test]
    async fn test_malformed_body_uses_defaults() {
        let app = test::init_service(build_app(test_data().await)).await;
        let req = test::TestRequest::post().uri("/led").set_payload("{not json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: LedStateDto = test::read_body_json(resp).await;
        assert_eq!(body, LedStateDto::default());
    }
}
