//! Recap report generation endpoint.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use perjadin_core::recap::{AllowancePolicy, RecapService};
use perjadin_core::xlsx::RecapWorkbook;
use perjadin_shared::AppError;

use crate::dto::TripReportDto;
use crate::error::ApiError;
use crate::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const CONTENT_DISPOSITION: &str = "attachment; filename=\"kwitansi-perjadin.xlsx\"";

/// POST `/reports/recap`
/// Aggregates the posted transactions and returns the recap workbook.
async fn generate_recap(
    State(state): State<AppState>,
    Json(request): Json<TripReportDto>,
) -> Result<Response, ApiError> {
    if request.assignees.is_empty() {
        return Err(ApiError(AppError::EmptyInput(
            "no assignees provided for report generation".to_string(),
        )));
    }

    let (metadata, assignees) = request.into_domain()?;
    let policy = AllowancePolicy {
        days: state.config.allowance.days,
        rate_per_day: state.config.allowance.rate_per_day,
    };

    let report = RecapService::build_report(&metadata, &assignees, &policy)?;
    let bytes = RecapWorkbook::render(&report)?;

    info!(
        assignees = assignees.len(),
        rows = report.advance_rows.len(),
        bytes = bytes.len(),
        "recap workbook generated"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CONTENT_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

/// Creates report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/recap", post(generate_recap))
}
