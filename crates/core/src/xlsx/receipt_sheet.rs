//! Receipt voucher ("kwitansi") sheets, one per recap variant.
//!
//! The voucher breaks the first listed traveler's costs down line by line
//! and spells the total out in words.

#![allow(clippy::cast_precision_loss)]

use rust_xlsxwriter::{Formula, Worksheet};

use crate::recap::{ReportRow, TripMetadata};
use perjadin_shared::terbilang::terbilang;

use super::error::RenderError;
use super::formats;

/// Advance receipt sheet name.
pub const SHEET_KW_ADVANCE: &str = "KW UANG MUKA";
/// Settlement receipt sheet name.
pub const SHEET_KW_SETTLEMENT: &str = "KW RAMPUNG";

const TOTAL_ROW: u32 = 23; // Excel row 24

/// Writes one receipt voucher for the first report row.
pub fn write_receipt_sheet(
    sheet: &mut Worksheet,
    row: &ReportRow,
    metadata: &TripMetadata,
) -> Result<(), RenderError> {
    let letterhead = formats::letterhead();
    let plain = formats::plain();
    let bold = formats::plain_bold();
    let currency = formats::currency_plain();

    sheet.merge_range(0, 0, 0, 11, "KEMENTERIAN KESEHATAN REPUBLIK INDONESIA", &letterhead)?;
    sheet.merge_range(1, 0, 1, 11, "DIREKTORAT JENDERAL", &letterhead)?;
    sheet.merge_range(2, 0, 2, 11, "PENANGGULANGAN PENYAKIT", &letterhead)?;
    sheet.merge_range(4, 0, 4, 11, "J A K A R T A", &letterhead)?;

    sheet.write_string_with_format(0, 12, "Tahun Anggaran", &plain)?;
    sheet.write_string_with_format(0, 14, ":", &plain)?;
    sheet.write_string_with_format(0, 15, "2025", &plain)?;
    sheet.write_string_with_format(1, 12, "No Bukti", &plain)?;
    sheet.write_string_with_format(1, 14, ":", &plain)?;
    sheet.write_string_with_format(2, 12, "Akun", &plain)?;
    sheet.write_string_with_format(2, 14, ":", &plain)?;
    sheet.write_string_with_format(2, 15, "024.05.WA.4815.EBD.953.", &plain)?;
    sheet.write_string_with_format(3, 15, "501.B.524111", &plain)?;

    sheet.merge_range(5, 0, 5, 18, "RINCIAN BIAYA PERJALANAN DINAS", &letterhead)?;

    sheet.write_string_with_format(6, 0, "Lampiran SPD Nomor", &plain)?;
    sheet.write_string_with_format(6, 5, ":", &plain)?;
    sheet.write_string_with_format(6, 6, &row.spd_number, &plain)?;
    sheet.write_string_with_format(7, 0, "Tanggal", &plain)?;
    sheet.write_string_with_format(7, 5, ":", &plain)?;
    sheet.write_string_with_format(
        7,
        6,
        &metadata.start_date.format("%Y-%m-%d").to_string(),
        &plain,
    )?;

    // Breakdown header.
    let header = formats::header();
    sheet.merge_range(9, 0, 10, 1, "NO", &header)?;
    sheet.merge_range(9, 2, 10, 10, "PERINCIAN BIAYA", &header)?;
    sheet.merge_range(9, 11, 10, 13, "JUMLAH", &header)?;
    sheet.merge_range(9, 14, 10, 18, "KETERANGAN", &header)?;

    let totals = &row.totals;

    // 1. Daily allowance: days x rate.
    sheet.write_string_with_format(12, 0, "1", &plain)?;
    sheet.write_string_with_format(12, 2, "Uang harian :", &plain)?;
    sheet.write_number_with_format(13, 2, totals.allowance_days as f64, &plain)?;
    sheet.write_string_with_format(13, 3, "hr", &plain)?;
    sheet.write_string_with_format(13, 4, "x", &plain)?;
    sheet.write_string_with_format(13, 5, "Rp.", &plain)?;
    sheet.write_number_with_format(13, 6, totals.allowance_rate_per_day as f64, &currency)?;
    sheet.write_string_with_format(13, 11, "Rp.", &plain)?;
    sheet.write_number_with_format(13, 12, totals.allowance_total as f64, &currency)?;

    // 2. Transport: flight ticket plus ground legs.
    sheet.write_string_with_format(14, 0, "2", &plain)?;
    sheet.write_string_with_format(14, 2, "Transport", &plain)?;
    sheet.write_string_with_format(15, 2, "a.", &plain)?;
    sheet.write_string_with_format(15, 3, "Tiket :", &plain)?;
    sheet.write_string_with_format(
        16,
        3,
        &format!("- Pesawat Jakarta - {} (PP)", metadata.destination_city),
        &plain,
    )?;
    sheet.write_string_with_format(16, 11, "Rp.", &plain)?;
    sheet.write_number_with_format(16, 12, totals.flight_total as f64, &currency)?;

    sheet.write_string_with_format(17, 2, "b.", &plain)?;
    sheet.write_string_with_format(17, 3, "Transport (PP):", &plain)?;
    sheet.write_string_with_format(18, 3, "- Transport Jakarta - Bandara Soetta (PP)", &plain)?;
    sheet.write_string_with_format(18, 11, "Rp.", &plain)?;
    sheet.write_number_with_format(18, 12, totals.ground_origin_total as f64, &currency)?;
    sheet.write_string_with_format(
        19,
        3,
        &format!("- Transport Daerah {} (PP)", metadata.destination_city),
        &plain,
    )?;
    sheet.write_string_with_format(19, 11, "Rp.", &plain)?;
    sheet.write_number_with_format(19, 12, totals.ground_region_total as f64, &currency)?;
    sheet.write_string_with_format(20, 3, "- Transport Darat", &plain)?;
    sheet.write_string_with_format(20, 11, "Rp.", &plain)?;
    sheet.write_number_with_format(20, 12, totals.ground_local_total as f64, &currency)?;

    // 3. Lodging: nights x rate.
    sheet.write_string_with_format(21, 0, "3", &plain)?;
    sheet.write_string_with_format(21, 2, "Biaya Penginapan :", &plain)?;
    sheet.write_number_with_format(22, 2, totals.lodging_nights as f64, &plain)?;
    sheet.write_string_with_format(22, 3, "Hari", &plain)?;
    sheet.write_string_with_format(22, 4, "x", &plain)?;
    sheet.write_string_with_format(22, 5, "Rp.", &plain)?;
    sheet.write_number_with_format(22, 6, totals.lodging_rate_per_night as f64, &currency)?;
    sheet.write_string_with_format(22, 11, "Rp.", &plain)?;
    sheet.write_number_with_format(22, 12, totals.lodging_total as f64, &currency)?;

    // Total row and the spelled-out amount.
    sheet.merge_range(TOTAL_ROW, 2, TOTAL_ROW, 10, "J U M L A H", &header)?;
    sheet.write_string_with_format(TOTAL_ROW, 11, "Rp.", &bold)?;
    sheet.write_formula_with_format(TOTAL_ROW, 12, Formula::new("=SUM(M12:M23)"), &bold)?;

    sheet.write_string_with_format(24, 0, "TERBILANG:", &bold)?;
    sheet.write_string_with_format(24, 3, &terbilang(totals.grand_total), &plain)?;

    let city_line = format!("Jakarta, {}", metadata.receipt_signature_date);
    sheet.write_string_with_format(26, 14, &city_line, &plain)?;
    sheet.write_string_with_format(27, 0, "Telah dibayar sejumlah", &plain)?;
    sheet.write_string_with_format(27, 14, "Telah menerima jumlah uang sebesar", &plain)?;
    sheet.write_string_with_format(28, 0, "Rp.", &plain)?;
    sheet.write_number_with_format(28, 2, totals.grand_total as f64, &currency)?;
    sheet.write_string_with_format(28, 14, "Rp.", &plain)?;
    sheet.write_number_with_format(28, 15, totals.grand_total as f64, &currency)?;

    sheet.write_string_with_format(29, 0, "Bendahara Pengeluaran Pembantu", &plain)?;
    sheet.write_string_with_format(29, 8, "PUM Timker", &plain)?;
    sheet.write_string_with_format(29, 14, &row.name, &plain)?;

    Ok(())
}
