//! Document intake and AI extraction.

pub mod error;
pub mod intake;
pub mod service;
pub mod types;

pub use error::ExtractError;
pub use intake::DocumentPolicy;
pub use service::{DocumentExtractor, ExtractionService};
pub use types::{Document, TripReport};
