use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    // datastore or other unexpected fault
    Internal = 1000,
    // required field absent or empty
    MissingField = 1001,
    // field present but out of range or of the wrong type
    InvalidField = 1002,
    // referenced row does not exist
    NotFound = 1003,
    // qr token cannot be decoded
    InvalidToken = 1004,
}

#[derive(Debug)]
pub struct ServiceError {
    pub code: ErrorCode,
    /// name of the offending field, set for `InvalidField`
    pub field: Option<&'static str>,
    pub msg: String,
}

impl ServiceError {
    pub fn internal(msg: impl Into<String>) -> Self {
        ServiceError { code: ErrorCode::Internal, field: None, msg: msg.into() }
    }

    pub fn missing_field(msg: impl Into<String>) -> Self {
        ServiceError { code: ErrorCode::MissingField, field: None, msg: msg.into() }
    }

    pub fn invalid_field(field: &'static str, msg: impl Into<String>) -> Self {
        ServiceError { code: ErrorCode::InvalidField, field: Some(field), msg: msg.into() }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError { code: ErrorCode::NotFound, field: None, msg: msg.into() }
    }

    pub fn invalid_token<D: Display>(diagnostic: D) -> Self {
        ServiceError { code: ErrorCode::InvalidToken, field: None, msg: format!("invalid qr_code: {diagnostic}") }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "service error code: {}, msg: {}", self.code as u16, self.msg)
    }
}

impl Error for ServiceError {}

impl From<rusqlite::Error> for ServiceError {
    fn from(e: rusqlite::Error) -> Self {
        ServiceError::internal(format!("sqlite error: {e}"))
    }
}

impl From<tokio_rusqlite::Error> for ServiceError {
    fn from(e: tokio_rusqlite::Error) -> Self {
        ServiceError::internal(format!("sqlite connection error: {e}"))
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::MissingField | ErrorCode::InvalidField | ErrorCode::InvalidToken => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.code {
            ErrorCode::Internal => json!({"error": "internal server error", "detail": self.msg}),
            _ => json!({"error": self.msg}),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServiceError::missing_field("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::invalid_field("volume", "x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::invalid_token("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::internal("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_token_keeps_diagnostic() {
        let e = ServiceError::invalid_token("Invalid symbol 33, offset 4.");
        assert_eq!(e.code, ErrorCode::InvalidToken);
        assert!(e.msg.contains("Invalid symbol"));
        assert!(e.to_string().contains("1004"));
    }
}
