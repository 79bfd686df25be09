//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Request DTO validation and domain mapping
//! - Response envelope shaping

pub mod dto;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use perjadin_core::extract::ExtractionService;
use perjadin_core::meeting::MeetingService;
use perjadin_shared::AppConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Extraction service; absent when no API key is configured.
    pub extraction: Option<Arc<ExtractionService>>,
    /// Meeting service; absent when conferencing is not configured.
    pub meetings: Option<Arc<MeetingService>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.upload.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_mul(2); // multipart framing overhead on top of the per-file cap

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.cors.origins();
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
