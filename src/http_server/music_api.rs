use actix_web::{get, post, web, HttpResponse};

use super::server::rejected;
use crate::common::error::ServiceError;
use crate::service::state_projector::{MusicChange, StateProjector};
use crate::service::validator;
use crate::util::json::parse_body;
use crate::info;

const LOG_TAG: &str = "music_api";

#[get("/music")]
pub async fn get_music(state: web::Data<StateProjector>) -> Result<HttpResponse, ServiceError> {
    let music = state.current_music().await?;
    Ok(HttpResponse::Ok().json(music))
}

#[post("/music/play")]
pub async fn play_music(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let mode = validator::validate_play(&parse_body(&body)).map_err(rejected)?;
    let music = state.apply_music(MusicChange::Play { mode }).await?;
    info!(LOG_TAG, "music play, mode: {}", music.mode);
    Ok(HttpResponse::Created().json(music))
}

#[post("/music/stop")]
pub async fn stop_music(state: web::Data<StateProjector>) -> Result<HttpResponse, ServiceError> {
    let music = state.apply_music(MusicChange::Stop).await?;
    info!(LOG_TAG, "music stop, mode: {}", music.mode);
    Ok(HttpResponse::Created().json(music))
}

#[post("/music/volume")]
pub async fn set_music_volume(state: web::Data<StateProjector>, body: web::Bytes) -> Result<HttpResponse, ServiceError> {
    let volume = validator::validate_volume(&parse_body(&body)).map_err(rejected)?;
    let music = state.apply_music(MusicChange::Volume(volume)).await?;
    info!(LOG_TAG, "music volume set to {}", music.volume);
    Ok(HttpResponse::Created().json(music))
}

#[cfg(test)]
mod test {
    use crate::entity::dto::MusicStateDto;
    use crate::http_server::server::build_app;
    use crate::http_server::server::test_support::test_data;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    fn music(status: &str, mode: &str, volume: i64) -> MusicStateDto {
        MusicStateDto { status: status.into(), mode: mode.into(), volume }
    }

    #[actix_web::test]
    async fn test_default_music() {
        let app = test::init_service(build_app(test_data().await)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/music").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: MusicStateDto = test::read_body_json(resp).await;
        assert_eq!(body, music("off", "classic", 80));
    }

    #[actix_web::test]
    async fn test_stop_after_play_carries_mode() {
        let app = test::init_service(build_app(test_data().await)).await;
        let req = test::TestRequest::post().uri("/music/play").set_json(json!({"mode": "jazz"})).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: MusicStateDto = test::read_body_json(resp).await;
        assert_eq!(body, music("on", "jazz", 80));

        let resp = test::call_service(&app, test::TestRequest::post().uri("/music/stop").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: MusicStateDto = test::read_body_json(resp).await;
        assert_eq!(body, music("off", "jazz", 80));
    }

    #[actix_web::test]
    async fn test_volume() {
        let app = test::init_service(build_app(test_data().await)).await;
        let req = test::TestRequest::post().uri("/music/play").set_json(json!({"mode": "rock"})).to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post().uri("/music/volume").set_json(json!({"volume": 42})).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: MusicStateDto = test::read_body_json(resp).await;
        assert_eq!(body, music("on", "rock", 42));

        let req = test::TestRequest::post().uri("/music/volume").set_json(json!({"volume": 300})).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/music").to_request()).await;
        let body: MusicStateDto = test::read_body_json(resp).await;
        assert_eq!(body, music("on", "rock", 42));
    }
}
