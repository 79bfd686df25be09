//! Workbook assembly.

use rust_xlsxwriter::Workbook;

use crate::recap::RecapReport;

use super::error::RenderError;
use super::receipt_sheet::{self, SHEET_KW_ADVANCE, SHEET_KW_SETTLEMENT};
use super::recap_sheet::{self, SHEET_ADVANCE, SHEET_SETTLEMENT};
use super::travel_order_sheet::{self, SHEET_SPPD};

/// Renders the recap report into the five-sheet workbook artifact.
pub struct RecapWorkbook;

impl RecapWorkbook {
    /// Renders the workbook and returns the XLSX bytes.
    ///
    /// Sheet order mirrors how the forms are filed: advance recap, its
    /// receipt, settlement recap, its receipt, then the travel order.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::NoRows` when the report has no rows, or a
    /// worksheet error from the underlying writer.
    pub fn render(report: &RecapReport) -> Result<Vec<u8>, RenderError> {
        if report.advance_rows.is_empty() {
            return Err(RenderError::NoRows);
        }

        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_ADVANCE)?;
        recap_sheet::write_recap_sheet(
            sheet,
            crate::recap::SheetVariant::Advance,
            &report.advance_rows,
            &report.metadata,
        )?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_KW_ADVANCE)?;
        receipt_sheet::write_receipt_sheet(sheet, &report.advance_rows[0], &report.metadata)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_SETTLEMENT)?;
        recap_sheet::write_recap_sheet(
            sheet,
            crate::recap::SheetVariant::Settlement,
            &report.settlement_rows,
            &report.metadata,
        )?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_KW_SETTLEMENT)?;
        receipt_sheet::write_receipt_sheet(sheet, &report.settlement_rows[0], &report.metadata)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_SPPD)?;
        travel_order_sheet::write_travel_order_sheet(
            sheet,
            &report.advance_rows,
            &report.metadata,
        )?;

        Ok(workbook.save_to_buffer()?)
    }
}
