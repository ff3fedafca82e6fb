//! HTTP error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rsvp_core::{RsvpError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// Handler error, rendered as `{ "ok": false, "error": ... }`.
///
/// Storage failures only expose `context` to the client; the underlying
/// error is logged.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: RsvpError,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Split a core error into a client error or a storage failure
    pub fn from_core(err: RsvpError, context: &'static str) -> Self {
        match err {
            RsvpError::Validation(e) => ApiError::Validation(e),
            source => ApiError::Storage { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Storage { context, source } => {
                tracing::error!("{}: {}", context, source);
                context.to_string()
            }
        };

        let body = Json(json!({
            "ok": false,
            "error": message,
        }));
        (status, body).into_response()
    }
}
