//! Meeting pipeline error types.

use thiserror::Error;

/// The pipeline step that failed. Later successful steps are never rolled
/// back, so the user-visible failure names exactly where the sequence
/// stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStep {
    /// Creating the conference on the provider.
    CreateMeeting,
    /// Provisioning the shared folder.
    CreateFolder,
    /// Duplicating the absence-form template.
    DuplicateTemplate,
    /// Sending the notification.
    Notify,
}

impl std::fmt::Display for MeetingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::CreateMeeting => "create meeting",
            Self::CreateFolder => "create drive folder",
            Self::DuplicateTemplate => "duplicate absence form",
            Self::Notify => "send notification",
        };
        f.write_str(label)
    }
}

/// A third-party provider call failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success HTTP status from the provider.
    #[error("{service} returned status {status}: {body}")]
    Status {
        /// Provider name.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// The request could not be sent.
    #[error("{service} request failed: {message}")]
    Request {
        /// Provider name.
        service: &'static str,
        /// Transport-level cause.
        message: String,
    },

    /// The response could not be decoded.
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        /// Provider name.
        service: &'static str,
        /// Decoder message.
        message: String,
    },
}

/// Meeting pipeline errors.
#[derive(Debug, Error)]
pub enum MeetingError {
    /// A pipeline step failed; everything after it was skipped.
    #[error("failed to {step}: {source}")]
    Step {
        /// The step that failed.
        step: MeetingStep,
        /// Provider failure.
        #[source]
        source: ProviderError,
    },

    /// A step was requested but its provider is not configured.
    #[error("cannot {step}: provider is not configured")]
    ProviderUnavailable {
        /// The unavailable step.
        step: MeetingStep,
    },
}
