//! Document upload and extraction endpoints.

use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use perjadin_core::extract::DocumentPolicy;
use perjadin_shared::AppError;

use crate::dto::TripReportDto;
use crate::error::ApiError;
use crate::AppState;

/// Multipart field name carrying the uploaded files.
const FILE_FIELD: &str = "file";

/// POST `/documents/extract`
/// Accepts scanned receipts and returns the extracted trip report.
async fn upload_and_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TripReportDto>, ApiError> {
    let Some(extraction) = &state.extraction else {
        return Err(ApiError(AppError::ServiceUnavailable(
            "document extraction is not configured".to_string(),
        )));
    };

    let files = read_file_fields(multipart).await?;
    let policy = DocumentPolicy::new(state.config.upload.max_file_size);
    let documents = policy.accept_all(files)?;

    info!(documents = documents.len(), "processing upload request");

    // The extraction call is the only slow step; bound it with a
    // cancellation signal so the request fails fast on timeout.
    let cancel = CancellationToken::new();
    let deadline = Duration::from_secs(state.config.extractor.timeout_secs);
    let guard = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        guard.cancel();
    });

    let report = extraction
        .extract(documents, &cancel)
        .await
        .inspect_err(|e| error!(error = %e, "extraction failed"))?;

    info!(assignees = report.assignees.len(), "extraction complete");
    Ok(Json(TripReportDto::from(&report)))
}

async fn read_file_fields(mut multipart: Multipart) -> Result<Vec<(String, Bytes)>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError(AppError::Validation(format!("failed to parse form data: {e}")))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content = field.bytes().await.map_err(|e| {
            ApiError(AppError::Validation(format!(
                "failed to read file {filename}: {e}"
            )))
        })?;
        files.push((filename, content));
    }

    if files.is_empty() {
        return Err(ApiError(AppError::EmptyInput(
            "no files uploaded".to_string(),
        )));
    }
    Ok(files)
}

/// Creates extraction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/documents/extract", post(upload_and_extract))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::create_router;
    use perjadin_shared::AppConfig;

    fn test_router() -> axum::Router {
        create_router(crate::AppState {
            config: Arc::new(AppConfig::default()),
            extraction: None,
            meetings: None,
        })
    }

    fn multipart_body(boundary: &str, filename: &str, content: &str) -> String {
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        )
    }

    #[tokio::test]
    async fn test_extract_without_configured_service_is_503() {
        let boundary = "X-PERJADIN-BOUNDARY";
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/documents/extract")
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(multipart_body(boundary, "scan.pdf", "%PDF-1.7")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "SERVICE_UNAVAILABLE");
    }

    mod with_fake_extractor {
        use super::*;
        use async_trait::async_trait;
        use perjadin_core::extract::{
            Document, DocumentExtractor, ExtractError, ExtractionService, TripReport,
        };
        use perjadin_core::recap::TripMetadata;
        use chrono::NaiveDate;

        struct StaticExtractor;

        #[async_trait]
        impl DocumentExtractor for StaticExtractor {
            async fn extract(&self, _documents: &[Document]) -> Result<TripReport, ExtractError> {
                Ok(TripReport {
                    metadata: TripMetadata {
                        start_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
                        end_date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
                        spd_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
                        departure_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
                        return_date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
                        receipt_signature_date: "22 Oktober 2025".to_string(),
                        destination_city: "Surabaya".to_string(),
                        activity_purpose: "Monev".to_string(),
                    },
                    assignees: vec![],
                })
            }
        }

        fn router_with_extractor() -> axum::Router {
            create_router(crate::AppState {
                config: Arc::new(AppConfig::default()),
                extraction: Some(Arc::new(ExtractionService::new(Arc::new(StaticExtractor)))),
                meetings: None,
            })
        }

        #[tokio::test]
        async fn test_extract_returns_report_json() {
            let boundary = "X-PERJADIN-BOUNDARY";
            let response = router_with_extractor()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/documents/extract")
                        .header(
                            "Content-Type",
                            format!("multipart/form-data; boundary={boundary}"),
                        )
                        .body(Body::from(multipart_body(boundary, "scan.pdf", "%PDF-1.7")))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["destinationCity"], "Surabaya");
        }

        #[tokio::test]
        async fn test_extract_rejects_disallowed_file_type() {
            let boundary = "X-PERJADIN-BOUNDARY";
            let response = router_with_extractor()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/documents/extract")
                        .header(
                            "Content-Type",
                            format!("multipart/form-data; boundary={boundary}"),
                        )
                        .body(Body::from(multipart_body(boundary, "notes.txt", "hello")))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn test_extract_without_files_is_400() {
            let boundary = "X-PERJADIN-BOUNDARY";
            let empty = format!("--{boundary}--\r\n");
            let response = router_with_extractor()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/documents/extract")
                        .header(
                            "Content-Type",
                            format!("multipart/form-data; boundary={boundary}"),
                        )
                        .body(Body::from(empty))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
