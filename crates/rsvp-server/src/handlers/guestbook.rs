//! Guestbook handlers

use super::{json_body, Ack};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use rsvp_core::{GuestbookEntry, GuestbookSubmission};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GuestbookListResponse {
    ok: bool,
    items: Vec<GuestbookEntry>,
}

pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<GuestbookSubmission>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let submission = json_body(payload)?;

    state
        .submissions
        .submit_guestbook(submission)
        .await
        .map_err(|e| ApiError::from_core(e, "failed to save submission"))?;

    Ok(Ack::ok())
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<GuestbookListResponse>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let items = state
        .submissions
        .recent_guestbook(query.limit)
        .await
        .map_err(|e| ApiError::from_core(e, "failed to load guestbook"))?;

    Ok(Json(GuestbookListResponse { ok: true, items }))
}
