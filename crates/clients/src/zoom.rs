//! Zoom conferencing client (server-to-server OAuth).

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use perjadin_core::meeting::{
    AutoRecording, ConferencingProvider, MeetingRequest, ProviderError, ScheduledMeeting,
};

const SERVICE: &str = "zoom";
const API_BASE_URL: &str = "https://api.zoom.us/v2";
const AUTH_URL: &str = "https://zoom.us/oauth/token";

/// Scheduled (non-recurring) meeting type on the Zoom API.
const MEETING_TYPE_SCHEDULED: u8 = 2;

/// Zoom API client implementing `ConferencingProvider`.
pub struct ZoomClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    base_url: String,
    auth_url: String,
}

impl ZoomClient {
    /// Creates a client with server-to-server OAuth credentials.
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            base_url: API_BASE_URL.to_string(),
            auth_url: AUTH_URL.to_string(),
        }
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .query(&[("grant_type", "account_credentials")])
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let auth: AuthResponse = response.json().await.map_err(|e| ProviderError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;
        Ok(auth.access_token)
    }
}

#[async_trait]
impl ConferencingProvider for ZoomClient {
    async fn create_meeting(
        &self,
        request: &MeetingRequest,
    ) -> Result<ScheduledMeeting, ProviderError> {
        let token = self.access_token().await?;

        let body = CreateMeetingBody {
            topic: request.title.clone(),
            meeting_type: MEETING_TYPE_SCHEDULED,
            start_time: request.start_time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            duration: request.duration_minutes,
            timezone: request.timezone.clone(),
            password: (!request.password.is_empty()).then(|| request.password.clone()),
            settings: MeetingSettings {
                waiting_room: request.options.conference.waiting_room,
                auto_recording: match request.options.conference.auto_recording {
                    AutoRecording::None => "none",
                    AutoRecording::Local => "local",
                    AutoRecording::Cloud => "cloud",
                }
                .to_string(),
                mute_upon_entry: true,
                host_video: true,
                participant_video: false,
            },
        };

        let url = format!("{}/users/{}/meetings", self.base_url, request.host_user_id);
        debug!(host = %request.host_user_id, "creating conference");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.as_u16() != 201 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let created: CreateMeetingResponse =
            response.json().await.map_err(|e| ProviderError::Decode {
                service: SERVICE,
                message: e.to_string(),
            })?;

        Ok(ScheduledMeeting {
            id: created.id.to_string(),
            title: request.title.clone(),
            join_url: created.join_url,
            password: created.password,
            start_time: request.start_time,
            timezone: request.timezone.clone(),
            duration_minutes: request.duration_minutes,
            host_user_id: request.host_user_id.clone(),
            created_at: Utc::now(),
        })
    }
}

#[derive(Serialize)]
struct CreateMeetingBody {
    topic: String,
    #[serde(rename = "type")]
    meeting_type: u8,
    start_time: String,
    duration: u32,
    timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    settings: MeetingSettings,
}

#[derive(Serialize)]
struct MeetingSettings {
    waiting_room: bool,
    auto_recording: String,
    mute_upon_entry: bool,
    host_video: bool,
    participant_video: bool,
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CreateMeetingResponse {
    id: i64,
    #[serde(default)]
    join_url: String,
    #[serde(default)]
    password: String,
}
