//! Meeting domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Auto-recording mode for the conference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoRecording {
    /// No automatic recording.
    #[default]
    None,
    /// Record to the host machine.
    Local,
    /// Record to the provider's cloud.
    Cloud,
}

/// Conference-provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConferenceOptions {
    /// Hold participants in a waiting room.
    pub waiting_room: bool,
    /// Require a join password; one is generated when none is supplied.
    pub require_password: bool,
    /// Automatic recording mode.
    pub auto_recording: AutoRecording,
    /// Mute participants on entry. Always on for these meetings.
    pub mute_upon_entry: bool,
}

/// Notification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationOptions {
    /// Whether to send a notification after scheduling.
    pub send_email: bool,
    /// Recipient channels; required when sending.
    pub channels: Vec<String>,
    /// Message body; required when sending.
    pub message: String,
}

/// Optional pipeline steps attached to a meeting request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingOptions {
    /// Provision a shared folder after the meeting is created.
    pub create_drive_folder: bool,
    /// Parent folder for the provisioned folder.
    pub drive_parent_folder_id: Option<String>,
    /// Duplicate the absence-form template into the provisioned folder.
    pub duplicate_absence_form: bool,
    /// Template to duplicate; required when `duplicate_absence_form`.
    pub absence_form_template_id: Option<String>,
    /// Notification settings.
    pub notify: NotificationOptions,
    /// Conference-provider settings.
    pub conference: ConferenceOptions,
}

/// Free-form request metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingMetadata {
    /// Owning project identifier.
    pub project_id: Option<String>,
    /// Arbitrary tags.
    pub tags: Vec<String>,
}

/// A validated meeting request ready for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// Meeting title.
    pub title: String,
    /// Meeting description.
    pub description: String,
    /// Local start time (parsed from the Indonesian datetime format).
    pub start_time: NaiveDateTime,
    /// IANA timezone of the start time.
    pub timezone: String,
    /// Duration in minutes (1..=480).
    pub duration_minutes: u32,
    /// Host account on the conferencing provider.
    pub host_user_id: String,
    /// Join password; may be empty, generated on demand.
    pub password: String,
    /// Optional pipeline steps.
    pub options: MeetingOptions,
    /// Free-form metadata.
    pub metadata: MeetingMetadata,
}

/// The conference as created on the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    /// Provider-assigned meeting id.
    pub id: String,
    /// Meeting title.
    pub title: String,
    /// Join URL.
    pub join_url: String,
    /// Effective join password (possibly provider-assigned).
    pub password: String,
    /// Start time as scheduled.
    pub start_time: NaiveDateTime,
    /// Timezone of the start time.
    pub timezone: String,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Host account id.
    pub host_user_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Result of the full scheduling pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingOutcome {
    /// The created conference.
    pub meeting: ScheduledMeeting,
    /// URL of the provisioned folder, when requested.
    pub drive_folder_url: Option<String>,
    /// URL of the duplicated absence form, when requested.
    pub absence_form_url: Option<String>,
    /// Whether the notification step ran successfully.
    pub notification_sent: bool,
}
