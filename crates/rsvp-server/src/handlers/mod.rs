//! HTTP handlers

pub mod guestbook;
pub mod health;
pub mod rsvp;

pub use health::health;

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;

/// `{ "ok": true }`
#[derive(Debug, Serialize)]
pub struct Ack {
    ok: bool,
}

impl Ack {
    pub fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}

/// Unwrap a JSON body, turning malformed input into a 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
