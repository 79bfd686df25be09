//! Travel-order (SPPD) sheet.

use rust_xlsxwriter::Worksheet;

use crate::recap::{ReportRow, TripMetadata};
use perjadin_shared::datetime::format_indonesian_date;

use super::error::RenderError;
use super::formats;

/// Travel-order sheet name.
pub const SHEET_SPPD: &str = "SPPD";

/// Writes the travel-order form: letterhead, trip fields for the lead
/// traveler, and the full roster.
pub fn write_travel_order_sheet(
    sheet: &mut Worksheet,
    rows: &[ReportRow],
    metadata: &TripMetadata,
) -> Result<(), RenderError> {
    let letterhead = formats::letterhead();
    let plain = formats::plain();
    let header = formats::header();
    let text = formats::text_cell();

    sheet.merge_range(0, 0, 0, 8, "KEMENTERIAN KESEHATAN REPUBLIK INDONESIA", &letterhead)?;
    sheet.merge_range(1, 0, 1, 8, "DIREKTORAT JENDERAL PENANGGULANGAN PENYAKIT", &letterhead)?;
    sheet.merge_range(3, 0, 3, 8, "SURAT PERJALANAN DINAS (SPD)", &letterhead)?;

    let lead = rows.first().ok_or(RenderError::NoRows)?;

    let fields = [
        ("Nomor SPD", lead.spd_number.clone()),
        ("Tanggal SPD", format_indonesian_date(metadata.spd_date)),
        ("Maksud perjalanan dinas", metadata.activity_purpose.clone()),
        ("Tempat tujuan", metadata.destination_city.clone()),
        (
            "Tanggal berangkat",
            format_indonesian_date(metadata.departure_date),
        ),
        (
            "Tanggal harus kembali",
            format_indonesian_date(metadata.return_date),
        ),
    ];

    let mut row_index: u32 = 5;
    for (label, value) in fields {
        sheet.write_string_with_format(row_index, 0, label, &plain)?;
        sheet.write_string_with_format(row_index, 3, ":", &plain)?;
        sheet.write_string_with_format(row_index, 4, &value, &plain)?;
        row_index += 1;
    }

    // Roster of all travelers on this order.
    row_index += 1;
    sheet.write_string_with_format(row_index, 0, "No", &header)?;
    sheet.write_string_with_format(row_index, 1, "Nama", &header)?;
    sheet.write_string_with_format(row_index, 2, "NIP", &header)?;
    sheet.write_string_with_format(row_index, 3, "Jabatan", &header)?;
    sheet.write_string_with_format(row_index, 4, "Gol", &header)?;
    sheet.write_string_with_format(row_index, 5, "No SPD", &header)?;
    row_index += 1;

    for report_row in rows {
        sheet.write_number_with_format(row_index, 0, f64::from(report_row.ordinal), &text)?;
        sheet.write_string_with_format(row_index, 1, &report_row.name, &text)?;
        sheet.write_string_with_format(row_index, 2, &report_row.employee_id, &text)?;
        sheet.write_string_with_format(row_index, 3, &report_row.position, &text)?;
        sheet.write_string_with_format(row_index, 4, &report_row.rank, &text)?;
        sheet.write_string_with_format(row_index, 5, &report_row.spd_number, &text)?;
        row_index += 1;
    }

    sheet.set_column_width(0, 5)?;
    sheet.set_column_width(1, 30)?;
    sheet.set_column_width(2, 20)?;
    sheet.set_column_width(3, 25)?;
    sheet.set_column_width(4, 10)?;
    sheet.set_column_width(5, 25)?;

    Ok(())
}
