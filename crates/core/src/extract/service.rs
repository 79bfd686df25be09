//! Cancellation-aware extraction service.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::ExtractError;
use super::types::{Document, TripReport};

/// Gateway to the AI vision model that turns scanned documents into a
/// structured trip report. Implemented by the clients crate.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extracts a structured report from the given documents.
    async fn extract(&self, documents: &[Document]) -> Result<TripReport, ExtractError>;
}

/// Domain service wrapping a `DocumentExtractor` with input validation and
/// cancellation handling.
pub struct ExtractionService {
    extractor: Arc<dyn DocumentExtractor>,
}

impl ExtractionService {
    /// Creates the service over an extractor implementation.
    #[must_use]
    pub fn new(extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self { extractor }
    }

    /// Runs extraction under the caller's cancellation signal.
    ///
    /// The extraction call is the only slow, network-bound step of the
    /// recap pipeline; if `cancel` fires first, the whole request fails
    /// fast with `ExtractError::Cancelled`, distinct from an upstream
    /// service error.
    ///
    /// # Errors
    ///
    /// Returns `NoDocuments` for an empty batch, `Cancelled` when the
    /// signal fires first, or the extractor's own error.
    pub async fn extract(
        &self,
        documents: Vec<Document>,
        cancel: &CancellationToken,
    ) -> Result<TripReport, ExtractError> {
        if documents.is_empty() {
            return Err(ExtractError::NoDocuments);
        }

        tokio::select! {
            () = cancel.cancelled() => Err(ExtractError::Cancelled),
            result = self.extractor.extract(&documents) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recap::TripMetadata;
    use bytes::Bytes;
    use chrono::NaiveDate;
    use std::time::Duration;

    struct SlowExtractor {
        delay: Duration,
    }

    #[async_trait]
    impl DocumentExtractor for SlowExtractor {
        async fn extract(&self, _documents: &[Document]) -> Result<TripReport, ExtractError> {
            tokio::time::sleep(self.delay).await;
            Ok(TripReport {
                metadata: TripMetadata {
                    start_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
                    spd_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
                    departure_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
                    return_date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
                    receipt_signature_date: "22 Oktober 2025".to_string(),
                    destination_city: "Surabaya".to_string(),
                    activity_purpose: "Monev".to_string(),
                },
                assignees: vec![],
            })
        }
    }

    fn document() -> Document {
        Document {
            content: Bytes::from_static(b"%PDF-1.7"),
            filename: "surat-tugas.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_documents_rejected() {
        let service = ExtractionService::new(Arc::new(SlowExtractor {
            delay: Duration::ZERO,
        }));
        let result = service.extract(vec![], &CancellationToken::new()).await;
        assert!(matches!(result, Err(ExtractError::NoDocuments)));
    }

    #[tokio::test]
    async fn test_extract_completes_when_not_cancelled() {
        let service = ExtractionService::new(Arc::new(SlowExtractor {
            delay: Duration::ZERO,
        }));
        let report = service
            .extract(vec![document()], &CancellationToken::new())
            .await
            .expect("should extract");
        assert_eq!(report.metadata.destination_city, "Surabaya");
    }

    #[tokio::test]
    async fn test_cancellation_wins_over_slow_extractor() {
        let service = ExtractionService::new(Arc::new(SlowExtractor {
            delay: Duration::from_secs(30),
        }));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = service.extract(vec![document()], &cancel).await;
        assert!(matches!(result, Err(ExtractError::Cancelled)));
    }
}
