//! Render error types.

use thiserror::Error;

/// Workbook rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No rows to render; the caller should have validated input.
    #[error("no report rows to render")]
    NoRows,

    /// Underlying worksheet error.
    #[error("worksheet error: {0}")]
    Worksheet(#[from] rust_xlsxwriter::XlsxError),
}
