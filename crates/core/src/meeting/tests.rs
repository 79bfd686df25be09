//! Meeting pipeline tests with fake providers.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::error::{MeetingError, MeetingStep, ProviderError};
use super::service::{ConferencingProvider, DriveProvider, MeetingService, Notifier};
use super::types::{
    ConferenceOptions, MeetingMetadata, MeetingOptions, MeetingRequest, NotificationOptions,
    ScheduledMeeting,
};

fn request() -> MeetingRequest {
    MeetingRequest {
        title: "Rapat Koordinasi".to_string(),
        description: "Koordinasi bulanan".to_string(),
        start_time: NaiveDate::from_ymd_opt(2025, 10, 25)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
        timezone: "Asia/Jakarta".to_string(),
        duration_minutes: 60,
        host_user_id: "host@example.go.id".to_string(),
        password: String::new(),
        options: MeetingOptions::default(),
        metadata: MeetingMetadata::default(),
    }
}

struct FakeConferencing {
    captured_password: Mutex<Option<String>>,
    fail: bool,
}

impl FakeConferencing {
    fn new() -> Self {
        Self {
            captured_password: Mutex::new(None),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            captured_password: Mutex::new(None),
            fail: true,
        }
    }
}

#[async_trait]
impl ConferencingProvider for FakeConferencing {
    async fn create_meeting(
        &self,
        request: &MeetingRequest,
    ) -> Result<ScheduledMeeting, ProviderError> {
        if self.fail {
            return Err(ProviderError::Status {
                service: "zoom",
                status: 401,
                body: "invalid credentials".to_string(),
            });
        }
        *self.captured_password.lock().unwrap() = Some(request.password.clone());
        Ok(ScheduledMeeting {
            id: "82923847".to_string(),
            title: request.title.clone(),
            join_url: "https://zoom.us/j/82923847".to_string(),
            password: request.password.clone(),
            start_time: request.start_time,
            timezone: request.timezone.clone(),
            duration_minutes: request.duration_minutes,
            host_user_id: request.host_user_id.clone(),
            created_at: Utc::now(),
        })
    }
}

#[derive(Default)]
struct FakeDrive {
    folder_calls: Mutex<Vec<(Option<String>, String)>>,
    duplicate_calls: Mutex<Vec<(String, Option<String>)>>,
    fail_folder: bool,
}

#[async_trait]
impl DriveProvider for FakeDrive {
    async fn create_folder(
        &self,
        parent_folder_id: Option<&str>,
        name: &str,
    ) -> Result<String, ProviderError> {
        if self.fail_folder {
            return Err(ProviderError::Status {
                service: "drive",
                status: 403,
                body: "quota exceeded".to_string(),
            });
        }
        self.folder_calls
            .lock()
            .unwrap()
            .push((parent_folder_id.map(ToString::to_string), name.to_string()));
        Ok("https://drive.google.com/drive/folders/folder-1".to_string())
    }

    async fn duplicate_template(
        &self,
        template_id: &str,
        target_folder_id: Option<&str>,
        _new_name: &str,
    ) -> Result<String, ProviderError> {
        self.duplicate_calls.lock().unwrap().push((
            template_id.to_string(),
            target_folder_id.map(ToString::to_string),
        ));
        Ok("https://docs.google.com/forms/copy-1".to_string())
    }
}

#[derive(Default)]
struct FakeNotifier {
    bodies: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(
        &self,
        _options: &NotificationOptions,
        body: &str,
    ) -> Result<(), ProviderError> {
        if self.fail {
            return Err(ProviderError::Request {
                service: "notification",
                message: "connection refused".to_string(),
            });
        }
        self.bodies.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_minimal_request_creates_meeting_only() {
    let conferencing = Arc::new(FakeConferencing::new());
    let service = MeetingService::new(conferencing, None, None);

    let outcome = service.schedule(request()).await.expect("should schedule");
    assert_eq!(outcome.meeting.id, "82923847");
    assert!(outcome.drive_folder_url.is_none());
    assert!(outcome.absence_form_url.is_none());
    assert!(!outcome.notification_sent);
}

#[tokio::test]
async fn test_password_generated_when_required() {
    let conferencing = Arc::new(FakeConferencing::new());
    let service = MeetingService::new(conferencing.clone(), None, None);

    let mut req = request();
    req.options.conference = ConferenceOptions {
        require_password: true,
        ..ConferenceOptions::default()
    };
    service.schedule(req).await.expect("should schedule");

    let captured = conferencing.captured_password.lock().unwrap();
    let password = captured.as_deref().expect("password captured");
    assert_eq!(password.len(), 8);
}

#[tokio::test]
async fn test_supplied_password_preserved() {
    let conferencing = Arc::new(FakeConferencing::new());
    let service = MeetingService::new(conferencing.clone(), None, None);

    let mut req = request();
    req.password = "SECRET12".to_string();
    req.options.conference.require_password = true;
    service.schedule(req).await.expect("should schedule");

    let captured = conferencing.captured_password.lock().unwrap();
    assert_eq!(captured.as_deref(), Some("SECRET12"));
}

#[tokio::test]
async fn test_full_pipeline_runs_in_order() {
    let conferencing = Arc::new(FakeConferencing::new());
    let drive = Arc::new(FakeDrive::default());
    let notifier = Arc::new(FakeNotifier::default());
    let service = MeetingService::new(conferencing, Some(drive.clone()), Some(notifier.clone()));

    let mut req = request();
    req.options.create_drive_folder = true;
    req.options.drive_parent_folder_id = Some("parent-7".to_string());
    req.options.duplicate_absence_form = true;
    req.options.absence_form_template_id = Some("template-9".to_string());
    req.options.notify = NotificationOptions {
        send_email: true,
        channels: vec!["ops@example.go.id".to_string()],
        message: "Rapat dijadwalkan".to_string(),
    };

    let outcome = service.schedule(req).await.expect("should schedule");
    assert_eq!(
        outcome.drive_folder_url.as_deref(),
        Some("https://drive.google.com/drive/folders/folder-1")
    );
    assert_eq!(
        outcome.absence_form_url.as_deref(),
        Some("https://docs.google.com/forms/copy-1")
    );
    assert!(outcome.notification_sent);

    // Folder created under the requested parent, named "{title} - {date}".
    let folders = drive.folder_calls.lock().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].0.as_deref(), Some("parent-7"));
    assert!(folders[0].1.starts_with("Rapat Koordinasi - "));

    // Template duplicated into the freshly provisioned folder.
    let duplicates = drive.duplicate_calls.lock().unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].0, "template-9");
    assert_eq!(duplicates[0].1.as_deref(), Some("folder-1"));

    // Notification body carries the join URL and both links.
    let bodies = notifier.bodies.lock().unwrap();
    assert!(bodies[0].contains("https://zoom.us/j/82923847"));
    assert!(bodies[0].contains("Drive Folder:"));
    assert!(bodies[0].contains("Absence Form:"));
}

#[tokio::test]
async fn test_conference_failure_aborts_pipeline() {
    let conferencing = Arc::new(FakeConferencing::failing());
    let drive = Arc::new(FakeDrive::default());
    let service = MeetingService::new(conferencing, Some(drive.clone()), None);

    let mut req = request();
    req.options.create_drive_folder = true;

    let err = service.schedule(req).await.unwrap_err();
    assert!(matches!(
        err,
        MeetingError::Step {
            step: MeetingStep::CreateMeeting,
            ..
        }
    ));
    // No later step ran.
    assert!(drive.folder_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_folder_failure_skips_notification() {
    let conferencing = Arc::new(FakeConferencing::new());
    let drive = Arc::new(FakeDrive {
        fail_folder: true,
        ..FakeDrive::default()
    });
    let notifier = Arc::new(FakeNotifier::default());
    let service = MeetingService::new(conferencing, Some(drive), Some(notifier.clone()));

    let mut req = request();
    req.options.create_drive_folder = true;
    req.options.notify.send_email = true;
    req.options.notify.channels = vec!["ops@example.go.id".to_string()];
    req.options.notify.message = "x".to_string();

    let err = service.schedule(req).await.unwrap_err();
    assert!(matches!(
        err,
        MeetingError::Step {
            step: MeetingStep::CreateFolder,
            ..
        }
    ));
    assert!(notifier.bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_notify_failure_names_the_step() {
    let conferencing = Arc::new(FakeConferencing::new());
    let notifier = Arc::new(FakeNotifier {
        fail: true,
        ..FakeNotifier::default()
    });
    let service = MeetingService::new(conferencing, None, Some(notifier));

    let mut req = request();
    req.options.notify.send_email = true;
    req.options.notify.channels = vec!["ops@example.go.id".to_string()];
    req.options.notify.message = "x".to_string();

    let err = service.schedule(req).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to send notification: notification request failed: connection refused"
    );
}

#[tokio::test]
async fn test_requested_step_without_provider_fails() {
    let conferencing = Arc::new(FakeConferencing::new());
    let service = MeetingService::new(conferencing, None, None);

    let mut req = request();
    req.options.create_drive_folder = true;

    let err = service.schedule(req).await.unwrap_err();
    assert!(matches!(
        err,
        MeetingError::ProviderUnavailable {
            step: MeetingStep::CreateFolder,
        }
    ));
}

#[tokio::test]
async fn test_duplicate_skipped_without_template_id() {
    let conferencing = Arc::new(FakeConferencing::new());
    let drive = Arc::new(FakeDrive::default());
    let service = MeetingService::new(conferencing, Some(drive.clone()), None);

    let mut req = request();
    req.options.duplicate_absence_form = true;
    req.options.absence_form_template_id = None;

    let outcome = service.schedule(req).await.expect("should schedule");
    assert!(outcome.absence_form_url.is_none());
    assert!(drive.duplicate_calls.lock().unwrap().is_empty());
}
