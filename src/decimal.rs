//! Conversion between decimal strings and fixed-point cents.
//!
//! Parsing truncates the fraction to two digits lexically and then lets
//! `rust_decimal` produce the exact value, so no binary floating point is
//! ever involved and truncation is toward zero at every magnitude.

use crate::error::{InvoiceError, Result};
use rust_decimal::Decimal;

/// A monetary amount in hundredths of the currency unit.
pub type Cents = i64;

/// Number of fractional digits a cent amount carries.
const SCALE: u32 = 2;

/// Parses a decimal string into cents, truncating extra fractional digits.
///
/// Accepts an optional sign, digits and an optional fraction (`"12"`,
/// `"-0.5"`, `".75"`, `"3."`). Anything else, including the empty string,
/// fails with [`InvoiceError::InvalidDecimal`] carrying the input verbatim.
///
/// # Examples
///
/// ```
/// use invoice_validator::parse_decimal_to_cents;
///
/// assert_eq!(parse_decimal_to_cents("1500.00").unwrap(), 150000);
/// assert_eq!(parse_decimal_to_cents("1.239").unwrap(), 123);
/// assert_eq!(parse_decimal_to_cents("-1.239").unwrap(), -123);
/// ```
pub fn parse_decimal_to_cents(text: &str) -> Result<Cents> {
    let invalid = || InvoiceError::InvalidDecimal(text.to_string());

    let literal = normalize(text).ok_or_else(invalid)?;
    let mut value = Decimal::from_str_exact(&literal).map_err(|_| invalid())?;
    value.rescale(SCALE);

    i64::try_from(value.mantissa()).map_err(|_| invalid())
}

/// Formats cents as a decimal string with exactly two fractional digits.
///
/// ```
/// use invoice_validator::format_cents_to_decimal;
///
/// assert_eq!(format_cents_to_decimal(175000), "1750.00");
/// assert_eq!(format_cents_to_decimal(-50), "-0.50");
/// ```
pub fn format_cents_to_decimal(cents: Cents) -> String {
    format!("{:.2}", Decimal::new(cents, SCALE))
}

/// Rewrites a decimal literal as `[-]int.ff`, dropping digits past the
/// second fractional place. Returns `None` if `text` is not a decimal.
fn normalize(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let int_part = int_part.trim_start_matches('0');
    let mut literal = String::with_capacity(int_part.len() + 5);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    literal.push('.');
    literal.extend(frac_part.chars().chain(std::iter::repeat('0')).take(SCALE as usize));

    Some(literal)
}
