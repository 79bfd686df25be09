//! The two recap sheets: advance ("uang muka") and settlement ("rampung").

#![allow(clippy::cast_precision_loss)]

use rust_xlsxwriter::{Formula, Worksheet};

use crate::recap::{ReportRow, SheetVariant, TripMetadata};
use perjadin_shared::datetime::format_indonesian_date;

use super::error::RenderError;
use super::formats;

/// Sheet name for the advance recap.
pub const SHEET_ADVANCE: &str = "PEMANTAUAN REKAP UANG MUKA";
/// Sheet name for the settlement recap.
pub const SHEET_SETTLEMENT: &str = "PEMANTAUAN REKAP RAMPUNG";

// Column indices (0-based). Data columns A..W plus the SPD reference in AA.
pub const COL_NO: u16 = 0;
pub const COL_NAME: u16 = 1;
pub const COL_NIP: u16 = 2;
pub const COL_POSITION: u16 = 3;
pub const COL_RANK: u16 = 4;
pub const COL_DESTINATION: u16 = 5;
pub const COL_DATE: u16 = 6;
pub const COL_ALLOWANCE_DAYS: u16 = 7;
pub const COL_ALLOWANCE_UNIT: u16 = 8;
pub const COL_ALLOWANCE_RATE: u16 = 9;
pub const COL_ALLOWANCE_TOTAL: u16 = 10;
pub const COL_LODGING_NIGHTS: u16 = 11;
pub const COL_LODGING_UNIT: u16 = 12;
pub const COL_LODGING_RATE: u16 = 13;
pub const COL_LODGING_TOTAL: u16 = 14;
pub const COL_FLIGHT: u16 = 15;
pub const COL_GROUND_ORIGIN: u16 = 16;
pub const COL_GROUND_REGION: u16 = 17;
pub const COL_GROUND_LOCAL: u16 = 18;
pub const COL_TRANSPORT_TOTAL: u16 = 19;
pub const COL_GRAND_TOTAL: u16 = 20;
pub const COL_ADVANCE_TOTAL: u16 = 21;
pub const COL_PAYABLE: u16 = 22;
pub const COL_SPD: u16 = 26;

/// First data row (0-based); Excel row 11.
pub const FIRST_DATA_ROW: u32 = 10;

const WORK_UNIT: &str = "Setditjen Penanggulangan Penyakit";
const COMMITMENT_OFFICER: &str = "Ruly Wahyuni, SE, MKM";
const COMMITMENT_OFFICER_ID: &str = "197508142000032001";
const EXPENDITURE_TREASURER: &str = "Fatmawati Husain, SE, M.Ak";
const EXPENDITURE_TREASURER_ID: &str = "198608202005012002";
const PAYER: &str = "Marsaulina Siahaan, SE";
const PAYER_ID: &str = "197101261997032002";

fn excel_row(index: u32) -> u32 {
    index + 1
}

fn col_letter(col: u16) -> String {
    // Good for A..Z plus the AA reference column.
    if col < 26 {
        char::from(b'A' + u8::try_from(col).unwrap_or(0)).to_string()
    } else {
        format!("A{}", char::from(b'A' + u8::try_from(col - 26).unwrap_or(0)))
    }
}

/// Writes one recap sheet and returns the row index just past the data.
pub fn write_recap_sheet(
    sheet: &mut Worksheet,
    variant: SheetVariant,
    rows: &[ReportRow],
    metadata: &TripMetadata,
) -> Result<u32, RenderError> {
    let is_settlement = variant == SheetVariant::Settlement;
    let last_col = if is_settlement { COL_PAYABLE } else { COL_GRAND_TOTAL };

    write_title(sheet, variant, last_col)?;
    write_table_header(sheet, variant)?;

    let mut row_index = FIRST_DATA_ROW;
    for row in rows {
        write_data_row(sheet, variant, row_index, row)?;
        row_index += 1;
    }

    write_summary(sheet, variant, row_index)?;
    write_signature_block(sheet, metadata, row_index + if is_settlement { 4 } else { 1 })?;
    set_column_widths(sheet)?;

    sheet.set_landscape();
    sheet.set_paper_size(14);
    sheet.set_print_fit_to_pages(1, 1);
    sheet.set_print_area(0, 0, row_index + 12, last_col)?;

    Ok(row_index)
}

fn write_title(
    sheet: &mut Worksheet,
    variant: SheetVariant,
    last_col: u16,
) -> Result<(), RenderError> {
    let title = match variant {
        SheetVariant::Advance => "Rekapitulasi Uang Muka Biaya Perjalanan Dinas",
        SheetVariant::Settlement => "Rekapitulasi Biaya Perjalanan Dinas Rampung",
    };

    let format = formats::title();
    sheet.merge_range(1, 0, 1, last_col, title, &format)?;
    sheet.merge_range(
        2,
        0,
        2,
        last_col,
        "Rekapitulasi Biaya Perjalanan Dinas dalam Rangka Pemantauan dan Evaluasi \
         Pelaksanaan Program di Daerah",
        &format,
    )?;
    sheet.merge_range(3, 0, 3, last_col, "AKUN : 4815.EBD.953.501.B.524111", &format)?;
    Ok(())
}

fn write_table_header(sheet: &mut Worksheet, variant: SheetVariant) -> Result<(), RenderError> {
    let header = formats::header();

    // Identity columns span the three header rows.
    let identity = [
        (COL_NO, "No"),
        (COL_NAME, "Nama"),
        (COL_NIP, "NIP"),
        (COL_POSITION, "Jabatan"),
        (COL_RANK, "Gol"),
        (COL_DESTINATION, "Tujuan"),
        (COL_DATE, "Tanggal"),
    ];
    for (col, label) in identity {
        sheet.merge_range(7, col, 9, col, label, &header)?;
    }

    // Category bands with their budget-line constants.
    sheet.merge_range(7, COL_ALLOWANCE_DAYS, 7, COL_ALLOWANCE_TOTAL, "Uang Harian", &header)?;
    sheet.merge_range(
        8,
        COL_ALLOWANCE_DAYS,
        8,
        COL_ALLOWANCE_TOTAL,
        "Konstanta : 008448",
        &header,
    )?;
    sheet.merge_range(7, COL_LODGING_NIGHTS, 7, COL_LODGING_TOTAL, "Penginapan", &header)?;
    sheet.merge_range(
        8,
        COL_LODGING_NIGHTS,
        8,
        COL_LODGING_TOTAL,
        "Konstanta : 008447",
        &header,
    )?;
    sheet.merge_range(7, COL_FLIGHT, 7, COL_TRANSPORT_TOTAL, "Transport", &header)?;
    sheet.merge_range(
        8,
        COL_FLIGHT,
        8,
        COL_TRANSPORT_TOTAL,
        "Konstanta : 008446",
        &header,
    )?;

    // Sub-headers.
    sheet.merge_range(9, COL_ALLOWANCE_DAYS, 9, COL_ALLOWANCE_UNIT, "Jml Hari", &header)?;
    sheet.write_string_with_format(9, COL_ALLOWANCE_RATE, "Perhari", &header)?;
    sheet.write_string_with_format(9, COL_ALLOWANCE_TOTAL, "Jumlah", &header)?;
    sheet.merge_range(9, COL_LODGING_NIGHTS, 9, COL_LODGING_UNIT, "Jml Hari", &header)?;
    sheet.write_string_with_format(9, COL_LODGING_RATE, "Perhari", &header)?;
    sheet.write_string_with_format(9, COL_LODGING_TOTAL, "Jumlah", &header)?;
    sheet.write_string_with_format(9, COL_FLIGHT, "Tiket Pesawat", &header)?;
    sheet.write_string_with_format(9, COL_GROUND_ORIGIN, "Transport Asal", &header)?;
    sheet.write_string_with_format(9, COL_GROUND_REGION, "Transport Daerah", &header)?;
    sheet.write_string_with_format(9, COL_GROUND_LOCAL, "Transport Darat", &header)?;
    sheet.write_string_with_format(9, COL_TRANSPORT_TOTAL, "Jumlah", &header)?;

    match variant {
        SheetVariant::Advance => {
            sheet.merge_range(
                7,
                COL_GRAND_TOTAL,
                9,
                COL_GRAND_TOTAL,
                "Jumlah Dibayarkan (Rp)",
                &header,
            )?;
        }
        SheetVariant::Settlement => {
            sheet.merge_range(
                7,
                COL_GRAND_TOTAL,
                9,
                COL_GRAND_TOTAL,
                "Jumlah SPJ Rampung (Rp)",
                &header,
            )?;
            sheet.merge_range(
                7,
                COL_ADVANCE_TOTAL,
                9,
                COL_ADVANCE_TOTAL,
                "Jumlah SPJ Uang Muka (Rp)",
                &header,
            )?;
            sheet.merge_range(
                7,
                COL_PAYABLE,
                9,
                COL_PAYABLE,
                "Jumlah Dibayarkan (Rp)",
                &header,
            )?;
        }
    }

    sheet.write_string_with_format(7, COL_SPD, "No SPD", &header)?;

    for row in 7..=9 {
        sheet.set_row_height(row, 28)?;
    }
    Ok(())
}

fn write_data_row(
    sheet: &mut Worksheet,
    variant: SheetVariant,
    row_index: u32,
    row: &ReportRow,
) -> Result<(), RenderError> {
    let text = formats::text_cell();
    let number = formats::number_cell();
    let totals = &row.totals;

    sheet.write_number_with_format(row_index, COL_NO, f64::from(row.ordinal), &text)?;
    sheet.write_string_with_format(row_index, COL_NAME, &row.name, &text)?;
    sheet.write_string_with_format(row_index, COL_NIP, &row.employee_id, &text)?;
    sheet.write_string_with_format(row_index, COL_POSITION, &row.position, &text)?;
    sheet.write_string_with_format(row_index, COL_RANK, &row.rank, &text)?;
    sheet.write_string_with_format(row_index, COL_DESTINATION, &row.destination, &text)?;
    sheet.write_string_with_format(
        row_index,
        COL_DATE,
        &format_indonesian_date(row.travel_date),
        &text,
    )?;

    sheet.write_number_with_format(
        row_index,
        COL_ALLOWANCE_DAYS,
        totals.allowance_days as f64,
        &number,
    )?;
    sheet.write_string_with_format(row_index, COL_ALLOWANCE_UNIT, "Hari", &text)?;
    sheet.write_number_with_format(
        row_index,
        COL_ALLOWANCE_RATE,
        totals.allowance_rate_per_day as f64,
        &number,
    )?;
    sheet.write_number_with_format(
        row_index,
        COL_ALLOWANCE_TOTAL,
        totals.allowance_total as f64,
        &number,
    )?;

    sheet.write_number_with_format(
        row_index,
        COL_LODGING_NIGHTS,
        totals.lodging_nights as f64,
        &number,
    )?;
    sheet.write_string_with_format(row_index, COL_LODGING_UNIT, "Hari", &text)?;
    sheet.write_number_with_format(
        row_index,
        COL_LODGING_RATE,
        totals.lodging_rate_per_night as f64,
        &number,
    )?;
    sheet.write_number_with_format(
        row_index,
        COL_LODGING_TOTAL,
        totals.lodging_total as f64,
        &number,
    )?;

    sheet.write_number_with_format(row_index, COL_FLIGHT, totals.flight_total as f64, &number)?;
    sheet.write_number_with_format(
        row_index,
        COL_GROUND_ORIGIN,
        totals.ground_origin_total as f64,
        &number,
    )?;
    sheet.write_number_with_format(
        row_index,
        COL_GROUND_REGION,
        totals.ground_region_total as f64,
        &number,
    )?;
    sheet.write_number_with_format(
        row_index,
        COL_GROUND_LOCAL,
        totals.ground_local_total as f64,
        &number,
    )?;

    let excel = excel_row(row_index);
    sheet.write_formula_with_format(
        row_index,
        COL_TRANSPORT_TOTAL,
        Formula::new(format!("=P{excel}+Q{excel}+R{excel}+S{excel}")),
        &number,
    )?;
    sheet.write_formula_with_format(
        row_index,
        COL_GRAND_TOTAL,
        Formula::new(format!("=T{excel}+O{excel}+K{excel}")),
        &number,
    )?;

    if variant == SheetVariant::Settlement {
        sheet.write_formula_with_format(
            row_index,
            COL_ADVANCE_TOTAL,
            Formula::new(format!("='{SHEET_ADVANCE}'!U{excel}")),
            &number,
        )?;
        sheet.write_formula_with_format(
            row_index,
            COL_PAYABLE,
            Formula::new(format!("=U{excel}-V{excel}")),
            &number,
        )?;
    }

    sheet.write_string_with_format(row_index, COL_SPD, &row.spd_number, &text)?;
    sheet.set_row_height(row_index, 28)?;
    Ok(())
}

fn sum_formula(col: u16, first_row: u32, last_row: u32) -> Formula {
    let letter = col_letter(col);
    Formula::new(format!(
        "=SUM({letter}{}:{letter}{})",
        excel_row(first_row),
        excel_row(last_row)
    ))
}

fn write_summary(
    sheet: &mut Worksheet,
    variant: SheetVariant,
    total_row: u32,
) -> Result<(), RenderError> {
    let label = formats::summary_label();
    let number = formats::summary_number();
    let last_data_row = total_row - 1;

    let sum_cols = [
        COL_ALLOWANCE_TOTAL,
        COL_LODGING_TOTAL,
        COL_FLIGHT,
        COL_GROUND_ORIGIN,
        COL_GROUND_REGION,
        COL_GROUND_LOCAL,
        COL_TRANSPORT_TOTAL,
        COL_GRAND_TOTAL,
    ];

    match variant {
        SheetVariant::Advance => {
            sheet.write_string_with_format(total_row, COL_NAME, "JUMLAH", &label)?;
            for col in sum_cols {
                sheet.write_formula_with_format(
                    total_row,
                    col,
                    sum_formula(col, FIRST_DATA_ROW, last_data_row),
                    &number,
                )?;
            }
            sheet.set_row_height(total_row, 28)?;
        }
        SheetVariant::Settlement => {
            // Three-line reconciliation: settlement total, advance total
            // (pulled from the advance sheet), and the net payable.
            let settled_row = total_row + 1;
            let advance_row = total_row + 2;
            let payable_row = total_row + 3;

            sheet.write_string_with_format(settled_row, COL_NAME, "JUMLAH SPJ RAMPUNG", &label)?;
            sheet.write_string_with_format(advance_row, COL_NAME, "JUMLAH SPJ UANG MUKA", &label)?;
            sheet.write_string_with_format(payable_row, COL_NAME, "JUMLAH DIBAYARKAN", &label)?;

            for col in sum_cols {
                let letter = col_letter(col);
                sheet.write_formula_with_format(
                    settled_row,
                    col,
                    sum_formula(col, FIRST_DATA_ROW, last_data_row),
                    &number,
                )?;
                sheet.write_formula_with_format(
                    advance_row,
                    col,
                    Formula::new(format!(
                        "='{SHEET_ADVANCE}'!{letter}{}",
                        excel_row(total_row)
                    )),
                    &number,
                )?;
                sheet.write_formula_with_format(
                    payable_row,
                    col,
                    Formula::new(format!(
                        "={letter}{}-{letter}{}",
                        excel_row(settled_row),
                        excel_row(advance_row)
                    )),
                    &number,
                )?;
            }

            sheet.write_formula_with_format(
                advance_row,
                COL_ADVANCE_TOTAL,
                sum_formula(COL_ADVANCE_TOTAL, FIRST_DATA_ROW, last_data_row),
                &number,
            )?;
            sheet.write_formula_with_format(
                payable_row,
                COL_PAYABLE,
                sum_formula(COL_PAYABLE, FIRST_DATA_ROW, last_data_row),
                &number,
            )?;

            for row in settled_row..=payable_row {
                sheet.set_row_height(row, 28)?;
            }
        }
    }
    Ok(())
}

fn write_signature_block(
    sheet: &mut Worksheet,
    metadata: &TripMetadata,
    after_row: u32,
) -> Result<(), RenderError> {
    let plain = formats::plain();
    let bold = formats::plain_bold();
    let mut row = after_row + 2;

    sheet.write_string_with_format(row, COL_NAME, "Mengetahui/Menyetujui", &plain)?;
    sheet.write_string_with_format(row, COL_POSITION, "Setuju/Lunas dibayar", &plain)?;
    row += 1;

    sheet.write_string_with_format(row, COL_NAME, "Pejabat Pembuat Komitmen II", &plain)?;
    sheet.write_string_with_format(
        row,
        COL_POSITION,
        &format!("Tanggal: {}", metadata.receipt_signature_date),
        &plain,
    )?;
    sheet.write_string_with_format(row, COL_ALLOWANCE_UNIT, "Yang Membayarkan", &plain)?;
    row += 1;

    sheet.write_string_with_format(
        row,
        COL_NAME,
        &format!("Unit Kerja {WORK_UNIT}"),
        &plain,
    )?;
    sheet.write_string_with_format(row, COL_POSITION, "Bendahara Pengeluaran", &plain)?;
    sheet.write_string_with_format(
        row,
        COL_ALLOWANCE_UNIT,
        "Pemegang Uang Muka Tim Kerja Manajemen Risiko, Reformasi Birokrasi dan \
         Monitoring Evaluasi",
        &plain,
    )?;
    row += 5;

    sheet.write_string_with_format(row, COL_NAME, COMMITMENT_OFFICER, &bold)?;
    sheet.write_string_with_format(row, COL_POSITION, EXPENDITURE_TREASURER, &bold)?;
    sheet.write_string_with_format(row, COL_ALLOWANCE_UNIT, PAYER, &bold)?;
    row += 1;

    sheet.write_string_with_format(row, COL_NAME, COMMITMENT_OFFICER_ID, &bold)?;
    sheet.write_string_with_format(row, COL_POSITION, EXPENDITURE_TREASURER_ID, &bold)?;
    sheet.write_string_with_format(row, COL_ALLOWANCE_UNIT, PAYER_ID, &bold)?;
    Ok(())
}

fn set_column_widths(sheet: &mut Worksheet) -> Result<(), RenderError> {
    sheet.set_column_width(COL_NO, 5)?;
    sheet.set_column_width(COL_NAME, 30)?;
    sheet.set_column_width(COL_NIP, 20)?;
    sheet.set_column_width(COL_POSITION, 25)?;
    sheet.set_column_width(COL_RANK, 25)?;
    sheet.set_column_width(COL_DESTINATION, 30)?;
    sheet.set_column_width(COL_DATE, 25)?;
    for col in COL_ALLOWANCE_DAYS..=COL_TRANSPORT_TOTAL {
        sheet.set_column_width(col, 15)?;
    }
    sheet.set_column_width(COL_GRAND_TOTAL, 20)?;
    sheet.set_column_width(COL_ADVANCE_TOTAL, 20)?;
    sheet.set_column_width(COL_PAYABLE, 20)?;
    Ok(())
}
