//! Application configuration management.
//!
//! Optional third-party credentials (conferencing, drive, notification,
//! extraction) are `Option`s: a missing key disables the feature at startup
//! with a warning rather than failing the boot.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Daily-allowance rates.
    #[serde(default)]
    pub allowance: AllowanceConfig,
    /// Document extraction (Gemini) configuration.
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// Video conferencing (Zoom) configuration.
    #[serde(default)]
    pub conferencing: ConferencingConfig,
    /// Cloud storage (Drive) configuration.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Notification service configuration.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5002
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Returns the configured origins as a list.
    #[must_use]
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

/// Daily-allowance rates. These differ per jurisdiction and budget year,
/// so they are configuration rather than code.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowanceConfig {
    /// Allowance days per trip.
    #[serde(default = "default_allowance_days")]
    pub days: i64,
    /// Allowance rate per day in rupiah.
    #[serde(default = "default_allowance_rate")]
    pub rate_per_day: i64,
}

impl Default for AllowanceConfig {
    fn default() -> Self {
        Self {
            days: default_allowance_days(),
            rate_per_day: default_allowance_rate(),
        }
    }
}

fn default_allowance_days() -> i64 {
    2
}

fn default_allowance_rate() -> i64 {
    688_000
}

/// Document extraction (Gemini) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// API key. Absent key disables extraction endpoints.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier.
    #[serde(default = "default_extractor_model")]
    pub model: String,
    /// Overall extraction deadline in seconds.
    #[serde(default = "default_extractor_timeout")]
    pub timeout_secs: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_extractor_model(),
            timeout_secs: default_extractor_timeout(),
        }
    }
}

fn default_extractor_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_extractor_timeout() -> u64 {
    300 // large multi-page PDFs take minutes
}

/// Video conferencing (Zoom server-to-server OAuth) configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConferencingConfig {
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl ConferencingConfig {
    /// Returns true when both credentials are present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

/// Cloud storage (Drive) configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriveConfig {
    /// API access token.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Notification service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Service base URL.
    #[serde(default = "default_notification_base_url")]
    pub base_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_notification_base_url(),
        }
    }
}

fn default_notification_base_url() -> String {
    "https://api.notification-service.com/v1".to_string()
}

/// Upload limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PERJADIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
