//! Notification delivery client.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use perjadin_core::meeting::{NotificationOptions, Notifier, ProviderError};

const SERVICE: &str = "notification";

/// Notification service client implementing `Notifier`.
pub struct NotificationClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NotificationClient {
    /// Creates a client against the configured service base URL.
    #[must_use]
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl Notifier for NotificationClient {
    async fn notify(
        &self,
        options: &NotificationOptions,
        body: &str,
    ) -> Result<(), ProviderError> {
        let email = EmailRequest {
            to: options.channels.clone(),
            subject: "Meeting Created: New Meeting Scheduled".to_string(),
            body: format!(
                "<h2>Meeting Details</h2>\n<p>{}</p>\n<p><strong>Meeting Link:</strong> \
                 <a href=\"{body}\">Join Meeting</a></p>",
                options.message
            ),
            html: true,
        };

        debug!(recipients = options.channels.len(), "sending notification");

        let response = self
            .http
            .post(format!("{}/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct EmailRequest {
    to: Vec<String>,
    subject: String,
    body: String,
    html: bool,
}
