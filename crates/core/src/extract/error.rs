//! Extraction error types.

use thiserror::Error;

/// Extraction pipeline errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No documents supplied.
    #[error("no documents provided")]
    NoDocuments,

    /// The extraction service has no API key configured.
    #[error("extraction service is not configured (missing API key)")]
    NotConfigured,

    /// The caller's cancellation signal fired before the call completed.
    #[error("extraction cancelled before completion")]
    Cancelled,

    /// A file exceeds the configured size ceiling.
    #[error("file {filename} exceeds maximum allowed size ({size} > {limit} bytes)")]
    FileTooLarge {
        /// Offending file.
        filename: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },

    /// A file's MIME type is not allowed.
    #[error("file type not allowed for {filename}: {mime_type}")]
    UnsupportedFileType {
        /// Offending file.
        filename: String,
        /// Detected MIME type.
        mime_type: String,
    },

    /// The upstream extraction service failed.
    #[error("extraction service error: {0}")]
    Upstream(String),

    /// The upstream response could not be parsed into a report.
    #[error("malformed extraction response: {0}")]
    MalformedResponse(String),
}
