//! http client for the smart home api
//! function:
//! - wrap every endpoint in a typed call
//! - non-2xx responses become `ClientError::Api` carrying the server's error text
//! - every request uses a fixed short timeout, nothing is retried

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::entity::dto::{
    AlarmDto, AlarmQueryDto, BannerDto, DeletedDto, ErrorDto, HealthDto, LedStateDto, MusicStateDto,
    NewAlarmDto, NewRoutineDto, PlayMusicDto, QrCodeDto, QrExportRequestDto, QrImportedDto, RoutineDto,
    VolumeDto,
};
use crate::debug;

const LOG_TAG: &str = "client";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum ClientError {
    /// connection, timeout or decoding failure from reqwest
    Transport(reqwest::Error),
    /// server answered with a non-2xx status
    Api { status: u16, msg: String },
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "http transport error: {}", e),
            ClientError::Api { status, msg } => write!(f, "api error status: {}, msg: {}", status, msg),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

pub struct SmartHomeClient {
    base_url: String,
    http: reqwest::Client,
}

impl SmartHomeClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(SmartHomeClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, api_url: &str) -> String {
        format!("{}/{}", self.base_url, api_url.trim_start_matches('/'))
    }

    /// send and decode a 2xx body, otherwise surface the server's error message
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        debug!(LOG_TAG, "{} {}", status.as_u16(), resp.url());
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(api_error(status, resp.text().await?))
    }

    pub async fn banner(&self) -> Result<BannerDto, ClientError> {
        self.send(self.http.get(self.url("/"))).await
    }

    pub async fn health(&self) -> Result<HealthDto, ClientError> {
        self.send(self.http.get(self.url("/healthz"))).await
    }

    pub async fn get_led(&self) -> Result<LedStateDto, ClientError> {
        self.send(self.http.get(self.url("/led"))).await
    }

    pub async fn set_led(&self, led: &LedStateDto) -> Result<LedStateDto, ClientError> {
        self.send(self.http.post(self.url("/led")).json(led)).await
    }

    pub async fn get_music(&self) -> Result<MusicStateDto, ClientError> {
        self.send(self.http.get(self.url("/music"))).await
    }

    pub async fn play_music(&self, mode: &str) -> Result<MusicStateDto, ClientError> {
        let body = PlayMusicDto { mode: mode.to_string() };
        self.send(self.http.post(self.url("/music/play")).json(&body)).await
    }

    pub async fn stop_music(&self) -> Result<MusicStateDto, ClientError> {
        self.send(self.http.post(self.url("/music/stop"))).await
    }

    pub async fn set_music_volume(&self, volume: i64) -> Result<MusicStateDto, ClientError> {
        self.send(self.http.post(self.url("/music/volume")).json(&VolumeDto { volume })).await
    }

    pub async fn list_alarms(&self, query: &AlarmQueryDto) -> Result<Vec<AlarmDto>, ClientError> {
        self.send(self.http.get(self.url("/alarm")).query(query)).await
    }

    pub async fn create_alarm(&self, status: &str, time: &str) -> Result<AlarmDto, ClientError> {
        let body = NewAlarmDto { status: status.to_string(), time: time.to_string() };
        self.send(self.http.post(self.url("/alarm")).json(&body)).await
    }

    pub async fn delete_alarm(&self, id: i64) -> Result<DeletedDto, ClientError> {
        self.send(self.http.delete(self.url(&format!("/alarm/{}", id)))).await
    }

    pub async fn list_routines(&self) -> Result<Vec<RoutineDto>, ClientError> {
        self.send(self.http.get(self.url("/routine"))).await
    }

    pub async fn create_routine(&self, routine: &NewRoutineDto) -> Result<RoutineDto, ClientError> {
        self.send(self.http.post(self.url("/routine")).json(routine)).await
    }

    pub async fn delete_routine(&self, id: i64) -> Result<DeletedDto, ClientError> {
        self.send(self.http.delete(self.url(&format!("/routine/{}", id)))).await
    }

    /// token for a stored routine
    pub async fn export_routine(&self, routine_id: i64) -> Result<String, ClientError> {
        let body = QrExportRequestDto { routine_id };
        let res: QrCodeDto = self.send(self.http.post(self.url("/qr/export")).json(&body)).await?;
        Ok(res.qr_code)
    }

    /// store the routine carried by a token, returns the new row
    pub async fn import_routine(&self, qr_code: &str) -> Result<RoutineDto, ClientError> {
        let body = QrCodeDto { qr_code: qr_code.to_string() };
        let res: QrImportedDto = self.send(self.http.post(self.url("/qr/import")).json(&body)).await?;
        Ok(res.imported)
    }
}

/// error text from an `{error: ...}` body, falling back to the raw body
fn api_error(status: StatusCode, body: String) -> ClientError {
    let msg = match serde_json::from_str::<ErrorDto>(body.as_str()) {
        Ok(err) => match err.detail {
            Some(detail) => format!("{}: {}", err.error, detail),
            None => err.error,
        },
        Err(_) => body,
    };
    ClientError::Api { status: status.as_u16(), msg }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::sqlite::SqliteConnection;
    use crate::http_server::server::build_app;
    use crate::service::state_projector::StateProjector;
    use actix_web::{web, HttpServer};
    use serde_json::json;

    /// start a real server on an ephemeral port and return its base url
    async fn start_server() -> String {
        let conn = SqliteConnection::open_in_memory().await.unwrap();
        let projector = StateProjector::new(conn);
        projector.init_tables().await.unwrap();
        let data = web::Data::new(projector);

        let server = HttpServer::new(move || build_app(data.clone()))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[test]
    fn test_api_error_message() {
        match api_error(StatusCode::BAD_REQUEST, r#"{"error":"volume must be 0-100"}"#.to_string()) {
            ClientError::Api { status, msg } => {
                assert_eq!(status, 400);
                assert_eq!(msg, "volume must be 0-100");
            }
            other => panic!("unexpected {other}"),
        }
        match api_error(StatusCode::BAD_GATEWAY, "upstream down".to_string()) {
            ClientError::Api { msg, .. } => assert_eq!(msg, "upstream down"),
            other => panic!("unexpected {other}"),
        }
    }

    #[actix_web::test]
    async fn test_client_against_server() {
        let client = SmartHomeClient::new(start_server().await.as_str()).unwrap();

        assert_eq!(client.health().await.unwrap().status, "ok");
        assert_eq!(client.banner().await.unwrap().service, "Smart Lighting API");

        let led = LedStateDto { status: "on".into(), color: "#FF00FF".into(), brightness: 70 };
        assert_eq!(client.set_led(&led).await.unwrap(), led);
        assert_eq!(client.get_led().await.unwrap(), led);

        client.play_music("jazz").await.unwrap();
        let stopped = client.stop_music().await.unwrap();
        assert_eq!(stopped, MusicStateDto { status: "off".into(), mode: "jazz".into(), volume: 80 });
        match client.set_music_volume(120).await {
            Err(ClientError::Api { status, msg }) => {
                assert_eq!(status, 400);
                assert!(msg.contains("volume"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let alarm = client.create_alarm("on", "07:30").await.unwrap();
        let query = AlarmQueryDto { status: Some("on".into()), ..Default::default() };
        assert_eq!(client.list_alarms(&query).await.unwrap(), vec![alarm.clone()]);
        assert_eq!(client.delete_alarm(alarm.id).await.unwrap().deleted, alarm.id);
        assert_eq!(client.delete_alarm(alarm.id).await.unwrap().deleted, alarm.id);

        let routine = client.create_routine(&NewRoutineDto {
            name: "evening".into(),
            time: "19:00".into(),
            enabled: true,
            actions: json!({"led": {"color": "#FFAA00"}}).as_object().unwrap().clone(),
        }).await.unwrap();
        let token = client.export_routine(routine.id).await.unwrap();
        let imported = client.import_routine(token.as_str()).await.unwrap();
        assert_ne!(imported.id, routine.id);
        assert_eq!(imported.actions, routine.actions);
        assert_eq!(client.list_routines().await.unwrap().len(), 2);
        assert_eq!(client.delete_routine(routine.id).await.unwrap().deleted, routine.id);

        match client.export_routine(routine.id).await {
            Err(ClientError::Api { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_transport_error() {
        // nothing listens on port 9 of localhost
        let client = SmartHomeClient::new("http://127.0.0.1:9").unwrap();
        match client.get_led().await {
            Err(ClientError::Transport(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
