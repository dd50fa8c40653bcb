//! # fort-api: HTTP Facade for the FORT Stack
//!
//! Thin Axum layer over the scoring and attestation crates. All domain
//! logic lives below; this crate selects input, orchestrates the calls in
//! order, and maps errors to HTTP.
//!
//! ## API Surface
//!
//! | Route                      | Module                 |
//! |----------------------------|------------------------|
//! | `GET /health`              | [`routes::health`]     |
//! | `POST /sign-score-latest`  | [`routes::scoring`]    |
//! | `POST /sign-score`         | [`routes::scoring`]    |
//! | `GET /signer`              | [`routes::signer`]     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → Handler
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod latest;
pub mod routes;
pub mod state;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.config.cors_origins.clone()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .merge(routes::health::router())
        .merge(routes::scoring::router())
        .merge(routes::signer::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
