//! Perjadin API Server
//!
//! Main entry point for the Perjadin backend service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perjadin_api::{AppState, create_router};
use perjadin_clients::{DriveClient, GeminiClient, NotificationClient, ZoomClient};
use perjadin_core::extract::ExtractionService;
use perjadin_core::meeting::{DriveProvider, MeetingService, Notifier};
use perjadin_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perjadin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    let extraction = build_extraction_service(&config);
    let meetings = build_meeting_service(&config);

    let state = AppState {
        config: Arc::new(config.clone()),
        extraction,
        meetings,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the extraction service when an API key is present. A missing key
/// disables the upload endpoints with a warning, not a startup failure.
fn build_extraction_service(config: &AppConfig) -> Option<Arc<ExtractionService>> {
    let Some(api_key) = config.extractor.api_key.clone() else {
        warn!("extractor API key not set, document extraction disabled");
        return None;
    };

    let client = GeminiClient::new(
        api_key,
        config.extractor.model.clone(),
        Duration::from_secs(config.extractor.timeout_secs),
    );
    info!(model = %config.extractor.model, "extraction service configured");
    Some(Arc::new(ExtractionService::new(Arc::new(client))))
}

/// Wires the meeting pipeline. Conferencing credentials are required for
/// the feature; drive and notification are optional steps.
fn build_meeting_service(config: &AppConfig) -> Option<Arc<MeetingService>> {
    let (Some(client_id), Some(client_secret)) = (
        config.conferencing.client_id.clone(),
        config.conferencing.client_secret.clone(),
    ) else {
        warn!("conferencing credentials not set, meeting scheduling disabled");
        return None;
    };

    let conferencing = Arc::new(ZoomClient::new(client_id, client_secret));

    let drive: Option<Arc<dyn DriveProvider>> = match config.drive.api_key.clone() {
        Some(key) => Some(Arc::new(DriveClient::new(key))),
        None => {
            warn!("drive API key not set, folder provisioning disabled");
            None
        }
    };

    let notifier: Option<Arc<dyn Notifier>> = match config.notification.api_key.clone() {
        Some(key) => Some(Arc::new(NotificationClient::new(
            key,
            config.notification.base_url.clone(),
        ))),
        None => {
            warn!("notification API key not set, notifications disabled");
            None
        }
    };

    info!("meeting service configured");
    Some(Arc::new(MeetingService::new(conferencing, drive, notifier)))
}
