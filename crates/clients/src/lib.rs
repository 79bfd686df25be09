//! Third-party service clients for Perjadin.
//!
//! Thin authenticated HTTP wrappers implementing the provider traits the
//! core defines:
//! - `gemini` - AI vision extraction (`DocumentExtractor`)
//! - `zoom` - video conferencing (`ConferencingProvider`)
//! - `drive` - cloud storage (`DriveProvider`)
//! - `notification` - notification delivery (`Notifier`)

pub mod drive;
pub mod gemini;
pub mod notification;
pub mod zoom;

pub use drive::DriveClient;
pub use gemini::GeminiClient;
pub use notification::NotificationClient;
pub use zoom::ZoomClient;
