//! Extraction data types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::recap::{Assignee, TripMetadata};

/// One uploaded document handed to the extraction model.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw file bytes.
    pub content: Bytes,
    /// Original filename.
    pub filename: String,
    /// Detected MIME type.
    pub mime_type: String,
}

/// The structured report an extraction run yields: trip constants plus the
/// assignee roster with their expense lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripReport {
    /// Trip-level constants from the travel order.
    pub metadata: TripMetadata,
    /// Assignees with grouped transactions.
    pub assignees: Vec<Assignee>,
}
