//! # Health
//!
//! `GET /health`: always 200 while the process is serving.

use axum::routing::get;
use axum::{Json, Router};
use fort_core::UnixTimestamp;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub ts: UnixTimestamp,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: UnixTimestamp::now(),
    })
}
