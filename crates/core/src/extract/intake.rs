//! Upload intake policy: MIME and size screening before extraction.

use bytes::Bytes;

use super::error::ExtractError;
use super::types::Document;

const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "application/pdf"];

/// Screening policy for uploaded documents.
#[derive(Debug, Clone)]
pub struct DocumentPolicy {
    max_file_size: u64,
}

impl DocumentPolicy {
    /// Default max file size: 10 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Creates a policy with the given size ceiling in bytes.
    #[must_use]
    pub const fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Screens one uploaded file and produces a `Document`.
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` or `UnsupportedFileType` when the file fails
    /// the policy.
    pub fn accept(&self, filename: &str, content: Bytes) -> Result<Document, ExtractError> {
        let size = content.len() as u64;
        if size > self.max_file_size {
            return Err(ExtractError::FileTooLarge {
                filename: filename.to_string(),
                size,
                limit: self.max_file_size,
            });
        }

        let mime_type = detect_mime_type(filename);
        if !ALLOWED_MIME_TYPES.contains(&mime_type) {
            return Err(ExtractError::UnsupportedFileType {
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
            });
        }

        Ok(Document {
            content,
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Screens a batch of uploads; the whole batch fails on the first bad
    /// file.
    ///
    /// # Errors
    ///
    /// Returns `NoDocuments` for an empty batch, or the first per-file
    /// failure.
    pub fn accept_all(
        &self,
        files: Vec<(String, Bytes)>,
    ) -> Result<Vec<Document>, ExtractError> {
        if files.is_empty() {
            return Err(ExtractError::NoDocuments);
        }

        files
            .into_iter()
            .map(|(filename, content)| self.accept(&filename, content))
            .collect()
    }
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FILE_SIZE)
    }
}

/// Detects the MIME type from the filename extension. Scanned receipts
/// arrive from browsers that do not always set a usable part content type.
#[must_use]
pub fn detect_mime_type(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("scan.png", "image/png")]
    #[case("SCAN.PNG", "image/png")]
    #[case("receipt.jpg", "image/jpeg")]
    #[case("receipt.jpeg", "image/jpeg")]
    #[case("surat-tugas.pdf", "application/pdf")]
    #[case("notes.txt", "application/octet-stream")]
    #[case("noextension", "application/octet-stream")]
    fn test_detect_mime_type(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(detect_mime_type(filename), expected);
    }

    #[test]
    fn test_accept_valid_file() {
        let policy = DocumentPolicy::default();
        let doc = policy
            .accept("kwitansi.pdf", Bytes::from_static(b"%PDF-1.7"))
            .expect("should accept");
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.filename, "kwitansi.pdf");
    }

    #[test]
    fn test_accept_rejects_oversized_file() {
        let policy = DocumentPolicy::new(4);
        let err = policy
            .accept("big.pdf", Bytes::from_static(b"%PDF-1.7"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileTooLarge { size: 8, limit: 4, .. }));
    }

    #[test]
    fn test_accept_rejects_disallowed_type() {
        let policy = DocumentPolicy::default();
        let err = policy
            .accept("virus.exe", Bytes::from_static(b"MZ"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_accept_all_rejects_empty_batch() {
        let policy = DocumentPolicy::default();
        assert!(matches!(
            policy.accept_all(vec![]),
            Err(ExtractError::NoDocuments)
        ));
    }

    #[test]
    fn test_accept_all_fails_on_first_bad_file() {
        let policy = DocumentPolicy::default();
        let files = vec![
            ("ok.png".to_string(), Bytes::from_static(b"\x89PNG")),
            ("bad.txt".to_string(), Bytes::from_static(b"hello")),
        ];
        assert!(matches!(
            policy.accept_all(files),
            Err(ExtractError::UnsupportedFileType { .. })
        ));
    }
}
