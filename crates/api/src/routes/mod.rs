//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod extraction;
pub mod health;
pub mod meetings;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(extraction::routes())
        .merge(reports::routes())
        .merge(meetings::routes())
}
