//! Tax arithmetic validation and invoice total aggregation.
//!
//! Checks run in document order and stop at the first failure:
//!
//! 1. `LineExtensionAmount` and `TaxTotal.TaxAmount` parse as decimals
//! 2. every subtotal satisfies `taxable * percent / 100 == tax`
//! 3. subtotal taxes add up to the declared tax total
//!
//! Products and sums are computed in `i128`, so no cent amount that parses
//! can overflow the checks.

use crate::decimal::{parse_decimal_to_cents, Cents};
use crate::error::{FieldPath, InvoiceError, Result};
use crate::invoice::{Invoice, TaxSubtotal};

/// Validates the tax arithmetic of `invoice` and returns its grand total in cents.
///
/// The total is `LineExtensionAmount + TaxTotal.TaxAmount`. The first
/// inconsistency found is returned as the error.
///
/// # Examples
///
/// ```
/// use invoice_validator::{calculate_invoice_total, Invoice, TaxSubtotal, TaxTotal};
///
/// let invoice = Invoice::new(
///     "1500.00",
///     TaxTotal::new("250.00", vec![
///         TaxSubtotal::new("1000.00", "200.00", "S", "20"),
///         TaxSubtotal::new("500.00", "50.00", "R", "10"),
///     ]),
/// );
/// assert_eq!(calculate_invoice_total(&invoice).unwrap(), 175000);
/// ```
pub fn calculate_invoice_total(invoice: &Invoice) -> Result<Cents> {
    let line = parse_field(&invoice.line_extension_amount, FieldPath::LineExtensionAmount)?;
    let total_tax = parse_field(&invoice.tax_total.tax_amount, FieldPath::TaxTotalAmount)?;

    let mut sum: i128 = 0;
    for (index, subtotal) in invoice.tax_total.tax_subtotal.iter().enumerate() {
        sum += check_subtotal(index, subtotal)? as i128;
    }

    if sum != total_tax as i128 {
        return Err(InvoiceError::TaxSumMismatch {
            total: total_tax,
            sum,
        });
    }

    line.checked_add(total_tax)
        .ok_or(InvoiceError::TotalOverflow {
            line,
            tax: total_tax,
        })
}

/// Verifies one subtotal and returns its tax amount.
fn check_subtotal(index: usize, subtotal: &TaxSubtotal) -> Result<Cents> {
    let taxable = parse_field(&subtotal.taxable_amount, FieldPath::TaxableAmount(index))?;
    let actual = parse_field(&subtotal.tax_amount, FieldPath::SubtotalTaxAmount(index))?;
    let percent = parse_percent(&subtotal.tax_category.percent)
        .map_err(|e| e.in_field(FieldPath::Percent(index)))?;

    // i128 division truncates toward zero, matching the cent truncation rule.
    let expected = taxable as i128 * percent as i128 / 100;
    if expected != actual as i128 {
        return Err(InvoiceError::TaxMismatch {
            index,
            taxable,
            percent,
            actual,
            expected,
        });
    }

    Ok(actual)
}

fn parse_field(text: &str, field: FieldPath) -> Result<Cents> {
    parse_decimal_to_cents(text).map_err(|e| e.in_field(field))
}

/// Parses a whole-number percentage such as `"20"` or `"-5"`.
fn parse_percent(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|source| InvoiceError::InvalidPercent {
            value: text.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::TaxTotal;

    fn standard_invoice() -> Invoice {
        Invoice::new(
            "1500.00",
            TaxTotal::new(
                "250.00",
                vec![
                    TaxSubtotal::new("1000.00", "200.00", "S", "20"),
                    TaxSubtotal::new("500.00", "50.00", "R", "10"),
                ],
            ),
        )
    }

    #[test]
    fn test_valid_invoice_total() {
        assert_eq!(calculate_invoice_total(&standard_invoice()).unwrap(), 175000);
    }

    #[test]
    fn test_negative_invoice_total() {
        let invoice = Invoice::new(
            "-1500.00",
            TaxTotal::new(
                "-250.00",
                vec![
                    TaxSubtotal::new("-1000.00", "-200.00", "S", "20"),
                    TaxSubtotal::new("-500.00", "-50.00", "R", "10"),
                ],
            ),
        );

        assert_eq!(calculate_invoice_total(&invoice).unwrap(), -175000);
    }

    #[test]
    fn test_zero_invoice() {
        let invoice = Invoice::new(
            "0.00",
            TaxTotal::new("0.00", vec![TaxSubtotal::new("0.00", "0.00", "S", "20")]),
        );

        assert_eq!(calculate_invoice_total(&invoice).unwrap(), 0);
    }

    #[test]
    fn test_no_subtotals_requires_zero_tax() {
        let invoice = Invoice::new("10.00", TaxTotal::new("0.00", vec![]));
        assert_eq!(calculate_invoice_total(&invoice).unwrap(), 1000);

        let invoice = Invoice::new("10.00", TaxTotal::new("1.00", vec![]));
        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(err.to_string(), "total tax amount (100) does not match TaxSubtotal sum (0)");
    }

    #[test]
    fn test_tax_mismatch_reports_operands() {
        let mut invoice = standard_invoice();
        invoice.tax_total.tax_subtotal[0].tax_amount = "250.00".to_string();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "incorrect tax calculation in TaxSubtotal[0]: 100000 * 20 / 100 != 25000"
        );
        match err {
            InvoiceError::TaxMismatch { expected, .. } => assert_eq!(expected, 20000),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_expected_tax_truncates_toward_zero() {
        // 3.33 * 15% = 0.4995 -> 49 cents
        let invoice = Invoice::new(
            "3.33",
            TaxTotal::new("0.49", vec![TaxSubtotal::new("3.33", "0.49", "S", "15")]),
        );
        assert_eq!(calculate_invoice_total(&invoice).unwrap(), 382);

        let invoice = Invoice::new(
            "-3.33",
            TaxTotal::new("-0.49", vec![TaxSubtotal::new("-3.33", "-0.49", "S", "15")]),
        );
        assert_eq!(calculate_invoice_total(&invoice).unwrap(), -382);
    }

    #[test]
    fn test_tax_sum_mismatch() {
        let mut invoice = standard_invoice();
        invoice.tax_total.tax_amount = "350.00".to_string();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "total tax amount (35000) does not match TaxSubtotal sum (25000)"
        );
        assert_eq!(err.field_path().as_deref(), Some("TaxTotal.TaxAmount"));
    }

    #[test]
    fn test_line_extension_error_takes_precedence() {
        let mut invoice = standard_invoice();
        invoice.line_extension_amount = "abc".to_string();
        invoice.tax_total.tax_amount = "xyz".to_string();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(err.to_string(), "invalid LineExtensionAmount: invalid value: abc");
    }

    #[test]
    fn test_first_failing_subtotal_wins() {
        let mut invoice = standard_invoice();
        invoice.tax_total.tax_subtotal[0].tax_category.percent = "twenty".to_string();
        invoice.tax_total.tax_subtotal[1].taxable_amount = "bad".to_string();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid Percent in TaxSubtotal[0]: strconv.Atoi: parsing \"twenty\": invalid syntax"
        );
        assert_eq!(err.field_path().as_deref(), Some("TaxSubtotal[0].Percent"));
    }

    #[test]
    fn test_subtotal_field_errors() {
        let mut invoice = standard_invoice();
        invoice.tax_total.tax_subtotal[1].tax_amount = "def".to_string();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(err.to_string(), "invalid TaxAmount in TaxSubtotal[1]: invalid value: def");
    }

    #[test]
    fn test_empty_percent() {
        let mut invoice = standard_invoice();
        invoice.tax_total.tax_subtotal[0].tax_category.percent = String::new();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid Percent in TaxSubtotal[0]: strconv.Atoi: parsing \"\": invalid syntax"
        );
    }

    #[test]
    fn test_out_of_range_percent() {
        let mut invoice = standard_invoice();
        invoice.tax_total.tax_subtotal[1].tax_category.percent = "99999999999999999999".to_string();

        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid Percent in TaxSubtotal[1]: strconv.Atoi: parsing \"99999999999999999999\": value out of range"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_large_amounts_do_not_overflow_checks() {
        let invoice = Invoice::new(
            "0.00",
            TaxTotal::new(
                "92233720368547758.07",
                vec![TaxSubtotal::new("92233720368547758.07", "92233720368547758.07", "S", "100")],
            ),
        );
        assert_eq!(calculate_invoice_total(&invoice).unwrap(), i64::MAX);

        let mut invoice = invoice;
        invoice.line_extension_amount = "0.01".to_string();
        let err = calculate_invoice_total(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invoice total overflows: 1 + 9223372036854775807"
        );
    }
}
