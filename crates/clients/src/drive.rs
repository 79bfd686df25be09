//! Drive storage client: folder provisioning and template duplication.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use perjadin_core::meeting::{DriveProvider, ProviderError};

const SERVICE: &str = "drive";
const API_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Drive API client implementing `DriveProvider`.
pub struct DriveClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl DriveClient {
    /// Creates a client with the given access token.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: API_BASE_URL.to_string(),
        }
    }

    async fn post_file_request(
        &self,
        url: String,
        body: serde_json::Value,
    ) -> Result<FileResponse, ProviderError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
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

        response.json().await.map_err(|e| ProviderError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DriveProvider for DriveClient {
    async fn create_folder(
        &self,
        parent_folder_id: Option<&str>,
        name: &str,
    ) -> Result<String, ProviderError> {
        let body = CreateFolderBody {
            name: name.to_string(),
            mime_type: FOLDER_MIME_TYPE.to_string(),
            parents: parent_folder_id.map(|id| vec![id.to_string()]),
        };

        debug!(folder = %name, "creating drive folder");
        let file = self
            .post_file_request(
                format!("{}/files", self.base_url),
                serde_json::to_value(body).unwrap_or_default(),
            )
            .await?;
        Ok(file.web_view_link)
    }

    async fn duplicate_template(
        &self,
        template_id: &str,
        target_folder_id: Option<&str>,
        new_name: &str,
    ) -> Result<String, ProviderError> {
        let mut body = serde_json::json!({ "name": new_name });
        if let Some(folder) = target_folder_id {
            body["parents"] = serde_json::json!([folder]);
        }

        debug!(template = %template_id, "duplicating template");
        let file = self
            .post_file_request(
                format!("{}/files/{}/copy", self.base_url, template_id),
                body,
            )
            .await?;
        Ok(file.web_view_link)
    }
}

#[derive(Serialize)]
struct CreateFolderBody {
    name: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct FileResponse {
    #[serde(rename = "webViewLink", default)]
    web_view_link: String,
}
