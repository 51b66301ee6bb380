//! Structured error shared with the identity service.
//!
//! The identity service reports failures as
//! `{"message": "...", "status": 404, "error": "not_found", "causes": []}`.
//! The same shape is used for errors produced locally, so a caller never has to
//! care whether a `RestError` was decoded from the wire or built here.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{status} {error}: {message}")]
pub struct RestError {
    #[serde(default)]
    message: String,
    // 0 when the payload omits it; see `or_status`.
    #[serde(default)]
    status: u16,
    #[serde(default)]
    error: String,
    #[serde(default)]
    causes: Vec<String>,
}

impl RestError {
    pub fn new(
        message: impl Into<String>,
        status: StatusCode,
        error: impl Into<String>,
        causes: Vec<String>,
    ) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            error: error.into(),
            causes,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, "bad_request", Vec::new())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED, "unauthorized", Vec::new())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND, "not_found", Vec::new())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_server_error",
            Vec::new(),
        )
    }

    /// Fill in `status` when a decoded payload did not carry one.
    pub(crate) fn or_status(mut self, status: u16) -> Self {
        if self.status == 0 {
            self.status = status;
        }
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw status as reported. Not guaranteed to be a valid HTTP code when decoded.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}
