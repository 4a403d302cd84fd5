//! pt-BR rendering helpers for money, dates and Brazilian document masks.
//!
//! Everything here is a pure function over strings or values. Masks only apply
//! when the digit count matches the expected shape; anything else is returned
//! untouched so partially typed or legacy values still display.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Separator placed between `R$` and the amount (NO-BREAK SPACE, as browsers render it).
pub const CURRENCY_GAP: char = '\u{a0}';

/// Strips every character that is not an ASCII digit.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `1250.5` → `R$ 1.250,50`
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R${CURRENCY_GAP}{},{frac_part}", group_thousands(int_part))
}

/// Quantities drop trailing zeros: `2.500` → `2,5`
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// CPF (11 digits) → `999.999.999-99`, CNPJ (14 digits) → `99.999.999/9999-99`.
pub fn format_document(document: &str) -> String {
    let digits = digits_only(document);
    match digits.len() {
        11 => format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        ),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        ),
        _ => document.to_string(),
    }
}

/// Mobile `(99) 99999-9999` or landline `(99) 9999-9999`.
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[0..2], &digits[2..7], &digits[7..11]),
        10 => format!("({}) {}-{}", &digits[0..2], &digits[2..6], &digits[6..10]),
        _ => phone.to_string(),
    }
}

/// CEP `99999-999`.
pub fn format_zip(zip: &str) -> String {
    let digits = digits_only(zip);
    if digits.len() == 8 {
        format!("{}-{}", &digits[0..5], &digits[5..8])
    } else {
        zip.to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
