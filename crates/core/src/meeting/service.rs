//! Meeting scheduling service.
//!
//! A strict sequence of dependent external calls: create the conference,
//! then optionally provision a folder, duplicate the absence-form
//! template, and notify. Each step's failure aborts all subsequent steps;
//! already-created external resources are NOT rolled back (accepted
//! limitation), so errors name the failed step.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand_core::{OsRng, RngCore};

use super::error::{MeetingError, MeetingStep, ProviderError};
use super::types::{MeetingOutcome, MeetingRequest, NotificationOptions, ScheduledMeeting};

const PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PASSWORD_LEN: usize = 8;

/// Creates conferences on the video-conferencing provider.
#[async_trait]
pub trait ConferencingProvider: Send + Sync {
    /// Creates a scheduled meeting.
    async fn create_meeting(
        &self,
        request: &MeetingRequest,
    ) -> Result<ScheduledMeeting, ProviderError>;
}

/// Provisions folders and duplicates templates on the storage provider.
#[async_trait]
pub trait DriveProvider: Send + Sync {
    /// Creates a folder and returns its web URL.
    async fn create_folder(
        &self,
        parent_folder_id: Option<&str>,
        name: &str,
    ) -> Result<String, ProviderError>;

    /// Copies a template file into a folder and returns the copy's URL.
    async fn duplicate_template(
        &self,
        template_id: &str,
        target_folder_id: Option<&str>,
        new_name: &str,
    ) -> Result<String, ProviderError>;
}

/// Sends the post-scheduling notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers the notification for a scheduled meeting.
    async fn notify(
        &self,
        options: &NotificationOptions,
        body: &str,
    ) -> Result<(), ProviderError>;
}

/// Orchestrates the meeting pipeline over the provider seams.
pub struct MeetingService {
    conferencing: Arc<dyn ConferencingProvider>,
    drive: Option<Arc<dyn DriveProvider>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl MeetingService {
    /// Creates the service. Drive and notifier are optional: requests that
    /// ask for an unconfigured step fail with `ProviderUnavailable`.
    #[must_use]
    pub fn new(
        conferencing: Arc<dyn ConferencingProvider>,
        drive: Option<Arc<dyn DriveProvider>>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            conferencing,
            drive,
            notifier,
        }
    }

    /// Runs the scheduling pipeline.
    ///
    /// # Errors
    ///
    /// Returns `MeetingError::Step` naming the first failed step, or
    /// `MeetingError::ProviderUnavailable` when a requested step has no
    /// configured provider.
    pub async fn schedule(&self, request: MeetingRequest) -> Result<MeetingOutcome, MeetingError> {
        let mut request = request;
        if request.options.conference.require_password && request.password.is_empty() {
            request.password = generate_password();
        }

        let meeting = self
            .conferencing
            .create_meeting(&request)
            .await
            .map_err(|source| MeetingError::Step {
                step: MeetingStep::CreateMeeting,
                source,
            })?;

        let mut outcome = MeetingOutcome {
            meeting,
            drive_folder_url: None,
            absence_form_url: None,
            notification_sent: false,
        };

        if request.options.create_drive_folder {
            let drive = self.drive.as_ref().ok_or(MeetingError::ProviderUnavailable {
                step: MeetingStep::CreateFolder,
            })?;

            let folder_name = format!(
                "{} - {}",
                request.title,
                Utc::now().date_naive().format("%Y-%m-%d")
            );
            let url = drive
                .create_folder(request.options.drive_parent_folder_id.as_deref(), &folder_name)
                .await
                .map_err(|source| MeetingError::Step {
                    step: MeetingStep::CreateFolder,
                    source,
                })?;
            outcome.drive_folder_url = Some(url);
        }

        if request.options.duplicate_absence_form {
            if let Some(template_id) = request
                .options
                .absence_form_template_id
                .as_deref()
                .filter(|id| !id.is_empty())
            {
                let drive = self.drive.as_ref().ok_or(MeetingError::ProviderUnavailable {
                    step: MeetingStep::DuplicateTemplate,
                })?;

                let folder_id = outcome
                    .drive_folder_url
                    .as_deref()
                    .and_then(extract_folder_id);
                let new_name = format!(
                    "Absence Form - {}",
                    Utc::now().format("%Y-%m-%d-%H-%M")
                );
                let url = drive
                    .duplicate_template(template_id, folder_id, &new_name)
                    .await
                    .map_err(|source| MeetingError::Step {
                        step: MeetingStep::DuplicateTemplate,
                        source,
                    })?;
                outcome.absence_form_url = Some(url);
            }
        }

        if request.options.notify.send_email {
            let notifier = self
                .notifier
                .as_ref()
                .ok_or(MeetingError::ProviderUnavailable {
                    step: MeetingStep::Notify,
                })?;

            let body = notification_body(&outcome);
            notifier
                .notify(&request.options.notify, &body)
                .await
                .map_err(|source| MeetingError::Step {
                    step: MeetingStep::Notify,
                    source,
                })?;
            outcome.notification_sent = true;
        }

        Ok(outcome)
    }
}

/// Extracts the folder id from a Drive web URL (`.../folders/<id>`).
#[must_use]
pub fn extract_folder_id(url: &str) -> Option<&str> {
    url.split_once("/folders/")
        .map(|(_, rest)| rest.split('/').next().unwrap_or(rest))
        .filter(|id| !id.is_empty())
}

fn notification_body(outcome: &MeetingOutcome) -> String {
    let mut body = outcome.meeting.join_url.clone();
    if let Some(folder) = &outcome.drive_folder_url {
        body.push_str(&format!("\nDrive Folder: {folder}"));
    }
    if let Some(form) = &outcome.absence_form_url {
        body.push_str(&format!("\nAbsence Form: {form}"));
    }
    body
}

fn generate_password() -> String {
    let mut bytes = [0u8; PASSWORD_LEN];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| PASSWORD_CHARSET[usize::from(*b) % PASSWORD_CHARSET.len()] as char)
        .collect()
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn test_generate_password_shape() {
        let password = generate_password();
        assert_eq!(password.len(), PASSWORD_LEN);
        assert!(password
            .bytes()
            .all(|b| PASSWORD_CHARSET.contains(&b)));
    }

    #[test]
    fn test_extract_folder_id() {
        assert_eq!(
            extract_folder_id("https://drive.google.com/drive/folders/abc123?usp=sharing"),
            Some("abc123?usp=sharing")
        );
        assert_eq!(
            extract_folder_id("https://drive.google.com/drive/folders/abc123/view"),
            Some("abc123")
        );
        assert_eq!(extract_folder_id("https://drive.google.com/file/d/xyz"), None);
    }
}
