//! Health check

use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "status": "ok",
        "backend": state.submissions.backend(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
