//! Meeting scheduling endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::Validate;

use perjadin_core::meeting::{
    AutoRecording, ConferenceOptions, MeetingMetadata, MeetingOptions, MeetingOutcome,
    MeetingRequest, NotificationOptions,
};
use perjadin_shared::AppError;
use perjadin_shared::datetime::parse_indonesian_datetime;

use crate::error::ApiError;
use crate::AppState;

/// Request body for scheduling a meeting.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMeetingRequest {
    /// Meeting title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Meeting description.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    /// Start time in the Indonesian format, e.g. "25 Oktober 2025 10:30:00".
    pub start_time: String,
    /// IANA timezone.
    #[validate(length(min = 1))]
    pub timezone: String,
    /// Duration in minutes.
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: u32,
    /// Host account on the conferencing provider.
    #[validate(length(min = 1))]
    pub host_user_id: String,
    /// Optional pipeline steps.
    #[serde(default)]
    pub options: MeetingOptionsDto,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: MeetingMetadataDto,
}

/// Options subsection of the request body.
#[derive(Debug, Default, Deserialize)]
pub struct MeetingOptionsDto {
    /// Provision a shared folder.
    #[serde(default)]
    pub create_drive_folder: bool,
    /// Parent folder id for the provisioned folder.
    #[serde(default)]
    pub drive_parent_folder_id: Option<String>,
    /// Duplicate the absence-form template.
    #[serde(default)]
    pub duplicate_absence_form: bool,
    /// Template id; required when duplicating.
    #[serde(default)]
    pub absence_form_template_id: Option<String>,
    /// Notification settings.
    #[serde(default)]
    pub notify: NotifyDto,
    /// Conference settings.
    #[serde(default)]
    pub zoom: ZoomOptionsDto,
}

/// Notification subsection.
#[derive(Debug, Default, Deserialize)]
pub struct NotifyDto {
    /// Send a notification after scheduling.
    #[serde(default)]
    pub send_email: bool,
    /// Recipient channels.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Message body.
    #[serde(default)]
    pub message: String,
}

/// Conference-provider subsection.
#[derive(Debug, Default, Deserialize)]
pub struct ZoomOptionsDto {
    /// Hold participants in a waiting room.
    #[serde(default)]
    pub waiting_room: bool,
    /// Require a join password.
    #[serde(default)]
    pub require_password: bool,
    /// Auto-recording mode: "none", "local" or "cloud".
    #[serde(default)]
    pub auto_recording: Option<AutoRecording>,
}

/// Metadata subsection.
#[derive(Debug, Default, Deserialize)]
pub struct MeetingMetadataDto {
    /// Owning project identifier.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Arbitrary tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response envelope for meeting creation.
#[derive(Debug, Serialize)]
pub struct CreateMeetingResponse {
    /// Whether the pipeline completed.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
    /// Pipeline outcome.
    pub data: MeetingOutcome,
}

impl CreateMeetingRequest {
    fn into_domain(self) -> Result<MeetingRequest, ApiError> {
        self.validate()
            .map_err(|e| ApiError(AppError::Validation(e.to_string())))?;

        // Cross-field rules the derive cannot express.
        if self.options.duplicate_absence_form
            && self
                .options
                .absence_form_template_id
                .as_deref()
                .unwrap_or("")
                .is_empty()
        {
            return Err(ApiError(AppError::Validation(
                "absence_form_template_id is required when duplicate_absence_form is true"
                    .to_string(),
            )));
        }
        if self.options.notify.send_email {
            if self.options.notify.channels.is_empty() {
                return Err(ApiError(AppError::Validation(
                    "channels are required when send_email is true".to_string(),
                )));
            }
            if self.options.notify.message.is_empty() {
                return Err(ApiError(AppError::Validation(
                    "message is required when send_email is true".to_string(),
                )));
            }
        }

        let start_time = parse_indonesian_datetime(&self.start_time)
            .map_err(|e| ApiError(AppError::Validation(format!("start_time: {e}"))))?;

        Ok(MeetingRequest {
            title: self.title,
            description: self.description,
            start_time,
            timezone: self.timezone,
            duration_minutes: self.duration_minutes,
            host_user_id: self.host_user_id,
            password: String::new(),
            options: MeetingOptions {
                create_drive_folder: self.options.create_drive_folder,
                drive_parent_folder_id: self.options.drive_parent_folder_id,
                duplicate_absence_form: self.options.duplicate_absence_form,
                absence_form_template_id: self.options.absence_form_template_id,
                notify: NotificationOptions {
                    send_email: self.options.notify.send_email,
                    channels: self.options.notify.channels,
                    message: self.options.notify.message,
                },
                conference: ConferenceOptions {
                    waiting_room: self.options.zoom.waiting_room,
                    require_password: self.options.zoom.require_password,
                    auto_recording: self.options.zoom.auto_recording.unwrap_or_default(),
                    mute_upon_entry: true,
                },
            },
            metadata: MeetingMetadata {
                project_id: self.metadata.project_id,
                tags: self.metadata.tags,
            },
        })
    }
}

/// POST `/meetings`
/// Runs the scheduling pipeline.
async fn create_meeting(
    State(state): State<AppState>,
    Json(request): Json<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<CreateMeetingResponse>), ApiError> {
    let Some(meetings) = &state.meetings else {
        return Err(ApiError(AppError::ServiceUnavailable(
            "video conferencing is not configured".to_string(),
        )));
    };

    let domain_request = request.into_domain()?;
    let title = domain_request.title.clone();

    let outcome = meetings
        .schedule(domain_request)
        .await
        .inspect_err(|e| error!(error = %e, "meeting pipeline failed"))?;

    info!(meeting_id = %outcome.meeting.id, title = %title, "meeting scheduled");

    Ok((
        StatusCode::CREATED,
        Json(CreateMeetingResponse {
            success: true,
            message: "Meeting created successfully".to_string(),
            data: outcome,
        }),
    ))
}

/// Creates meeting routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/meetings", post(create_meeting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
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

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "title": "Rapat Koordinasi",
            "description": "Koordinasi bulanan",
            "start_time": "25 Oktober 2025 10:30:00",
            "timezone": "Asia/Jakarta",
            "duration_minutes": 60,
            "host_user_id": "host@example.go.id"
        })
    }

    async fn post_json(body: serde_json::Value) -> axum::http::Response<Body> {
        test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/meetings")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_meeting_unconfigured_is_503() {
        let response = post_json(valid_body()).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_into_domain_parses_indonesian_start_time() {
        let request: CreateMeetingRequest = serde_json::from_value(valid_body()).unwrap();
        let domain = request.into_domain().expect("should map");
        assert_eq!(domain.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-10-25 10:30:00");
        assert!(domain.options.conference.mute_upon_entry);
    }

    #[test]
    fn test_into_domain_rejects_english_month() {
        let mut body = valid_body();
        body["start_time"] = serde_json::json!("25 October 2025 10:30:00");
        let request: CreateMeetingRequest = serde_json::from_value(body).unwrap();
        let err = request.into_domain().unwrap_err();
        assert_eq!(err.0.status_code(), 400);
        assert!(err.0.to_string().contains("start_time"));
    }

    #[test]
    fn test_into_domain_rejects_zero_duration() {
        let mut body = valid_body();
        body["duration_minutes"] = serde_json::json!(0);
        let request: CreateMeetingRequest = serde_json::from_value(body).unwrap();
        assert!(request.into_domain().is_err());
    }

    #[test]
    fn test_into_domain_requires_template_when_duplicating() {
        let mut body = valid_body();
        body["options"] = serde_json::json!({ "duplicate_absence_form": true });
        let request: CreateMeetingRequest = serde_json::from_value(body).unwrap();
        let err = request.into_domain().unwrap_err();
        assert!(err.0.to_string().contains("absence_form_template_id"));
    }

    #[test]
    fn test_into_domain_requires_channels_and_message_for_notify() {
        let mut body = valid_body();
        body["options"] = serde_json::json!({ "notify": { "send_email": true } });
        let request: CreateMeetingRequest = serde_json::from_value(body).unwrap();
        let err = request.into_domain().unwrap_err();
        assert!(err.0.to_string().contains("channels"));

        let mut body = valid_body();
        body["options"] = serde_json::json!({
            "notify": { "send_email": true, "channels": ["ops@example.go.id"] }
        });
        let request: CreateMeetingRequest = serde_json::from_value(body).unwrap();
        let err = request.into_domain().unwrap_err();
        assert!(err.0.to_string().contains("message"));
    }

    #[tokio::test]
    async fn test_create_meeting_invalid_recording_mode_is_422() {
        // Unknown enum labels are rejected at deserialization time.
        let mut body = valid_body();
        body["options"] = serde_json::json!({ "zoom": { "auto_recording": "vhs" } });
        let response = post_json(body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(!bytes.is_empty());
    }
}
