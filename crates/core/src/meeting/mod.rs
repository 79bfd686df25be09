//! Meeting scheduling pipeline.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{MeetingError, MeetingStep, ProviderError};
pub use service::{ConferencingProvider, DriveProvider, MeetingService, Notifier};
pub use types::{
    AutoRecording, ConferenceOptions, MeetingMetadata, MeetingOptions, MeetingOutcome,
    MeetingRequest, NotificationOptions, ScheduledMeeting,
};
