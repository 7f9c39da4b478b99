// ── Display formatting (pt-BR) ──

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

const NBSP: char = '\u{a0}';

fn is_digits(raw: &str, len: usize) -> bool {
    raw.len() == len && raw.bytes().all(|b| b.is_ascii_digit())
}

/// `12345678901` → `123.456.789-01`. Anything that is not exactly eleven
/// digits is returned unchanged.
pub fn format_cpf(raw: &str) -> String {
    if !is_digits(raw, 11) {
        return raw.to_owned();
    }
    format!("{}.{}.{}-{}", &raw[..3], &raw[3..6], &raw[6..9], &raw[9..])
}

/// `11987654321` → `(11) 98765-4321`, `1133334444` → `(11) 3333-4444`.
/// Other inputs are returned unchanged.
pub fn format_phone(raw: &str) -> String {
    if is_digits(raw, 11) {
        format!("({}) {}-{}", &raw[..2], &raw[2..7], &raw[7..])
    } else if is_digits(raw, 10) {
        format!("({}) {}-{}", &raw[..2], &raw[2..6], &raw[6..])
    } else {
        raw.to_owned()
    }
}

/// Brazilian real with two decimals: `1234.5` → `R$ 1.234,50` (the space
/// is a non-breaking one).
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b != b'0' && b != b'.') {
        "-"
    } else {
        ""
    };
    format!("{sign}R${NBSP}{grouped},{frac_part}")
}

/// `dd/mm/yyyy` in the timestamp's own offset.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy, HH:MM` in the timestamp's own offset.
pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y, %H:%M").to_string()
}
