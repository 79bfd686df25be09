//! Shared cell formats for the recap workbook.
//!
//! The bureaucratic layout uses Tahoma throughout, medium borders around
//! the tabular areas, and `#,##0` for rupiah amounts.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

pub const FONT: &str = "Tahoma";
pub const NUM_FORMAT: &str = "#,##0";

pub fn title() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(12)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

pub fn header() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Medium)
}

pub fn text_cell() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Medium)
}

pub fn number_cell() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Medium)
        .set_num_format(NUM_FORMAT)
}

pub fn summary_label() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_bold()
        .set_align(FormatAlign::Right)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Medium)
}

pub fn summary_number() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_bold()
        .set_align(FormatAlign::Right)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Medium)
        .set_num_format(NUM_FORMAT)
}

pub fn plain() -> Format {
    Format::new().set_font_name(FONT).set_font_size(10)
}

pub fn plain_bold() -> Format {
    Format::new().set_font_name(FONT).set_font_size(10).set_bold()
}

pub fn letterhead() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

pub fn currency_plain() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(10)
        .set_num_format(NUM_FORMAT)
}
