//! Spelled-out rupiah amounts for receipt vouchers.
//!
//! Indonesian receipt forms carry the total both as digits and in words
//! ("TERBILANG: Tiga Juta Seratus Tujuh Puluh Enam Ribu").

const UNITS: [&str; 12] = [
    "", "Satu", "Dua", "Tiga", "Empat", "Lima", "Enam", "Tujuh", "Delapan", "Sembilan", "Sepuluh",
    "Sebelas",
];

/// Spells out a non-negative rupiah amount in Indonesian.
///
/// Zero and negative amounts return an empty string, matching the blank
/// cell the form shows for them.
#[must_use]
pub fn terbilang(n: i64) -> String {
    if n <= 0 {
        return String::new();
    }
    collapse_spaces(&spell(n))
}

fn spell(n: i64) -> String {
    match n {
        0..=11 => UNITS[usize::try_from(n).unwrap_or(0)].to_string(),
        12..=19 => format!("{} Belas", spell(n - 10)),
        20..=99 => format!("{} Puluh {}", spell(n / 10), spell(n % 10)),
        100..=199 => format!("Seratus {}", spell(n - 100)),
        200..=999 => format!("{} Ratus {}", spell(n / 100), spell(n % 100)),
        1_000..=1_999 => format!("Seribu {}", spell(n - 1_000)),
        2_000..=999_999 => format!("{} Ribu {}", spell(n / 1_000), spell(n % 1_000)),
        1_000_000..=999_999_999 => {
            format!("{} Juta {}", spell(n / 1_000_000), spell(n % 1_000_000))
        }
        1_000_000_000..=999_999_999_999 => format!(
            "{} Miliar {}",
            spell(n / 1_000_000_000),
            spell(n % 1_000_000_000)
        ),
        1_000_000_000_000..=999_999_999_999_999 => format!(
            "{} Triliun {}",
            spell(n / 1_000_000_000_000),
            spell(n % 1_000_000_000_000)
        ),
        _ => String::new(),
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
