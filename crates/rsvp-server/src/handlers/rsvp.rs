//! RSVP handlers

use super::{json_body, Ack};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use rsvp_core::RsvpSubmission;

pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<RsvpSubmission>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let submission = json_body(payload)?;

    state
        .submissions
        .submit_rsvp(submission)
        .await
        .map_err(|e| ApiError::from_core(e, "failed to save submission"))?;

    Ok(Ack::ok())
}
