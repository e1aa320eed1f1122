//! Error types for invoice validation and batch reporting.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use thiserror::Error;

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, InvoiceError>;

/// Result type alias for batch and CLI operations.
pub type BatchResult<T> = std::result::Result<T, BatchError>;

/// Identifies the invoice field a parse failure belongs to.
///
/// `Display` yields the phrase used inside error messages
/// (`TaxAmount in TaxSubtotal[1]`), while [`FieldPath::path`] yields the
/// dotted document path (`TaxSubtotal[1].TaxAmount`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    LineExtensionAmount,
    TaxTotalAmount,
    TaxableAmount(usize),
    SubtotalTaxAmount(usize),
    Percent(usize),
}

impl FieldPath {
    /// Dotted path of the field within the invoice document.
    pub fn path(&self) -> String {
        match self {
            FieldPath::LineExtensionAmount => "LineExtensionAmount".to_string(),
            FieldPath::TaxTotalAmount => "TaxTotal.TaxAmount".to_string(),
            FieldPath::TaxableAmount(i) => format!("TaxSubtotal[{}].TaxableAmount", i),
            FieldPath::SubtotalTaxAmount(i) => format!("TaxSubtotal[{}].TaxAmount", i),
            FieldPath::Percent(i) => format!("TaxSubtotal[{}].Percent", i),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::LineExtensionAmount => write!(f, "LineExtensionAmount"),
            FieldPath::TaxTotalAmount => write!(f, "TaxAmount in TaxTotal"),
            FieldPath::TaxableAmount(i) => write!(f, "TaxableAmount in TaxSubtotal[{}]", i),
            FieldPath::SubtotalTaxAmount(i) => write!(f, "TaxAmount in TaxSubtotal[{}]", i),
            FieldPath::Percent(i) => write!(f, "Percent in TaxSubtotal[{}]", i),
        }
    }
}

/// Errors produced while parsing amounts or validating an invoice.
///
/// Every variant is terminal: it describes malformed input, never a
/// transient condition. Messages are stable and embed the offending values.
#[derive(Error, Debug)]
pub enum InvoiceError {
    /// A monetary string is not a valid decimal number.
    #[error("invalid value: {0}")]
    InvalidDecimal(String),

    /// A percent string is not a plain integer.
    #[error("strconv.Atoi: parsing {value:?}: {}", int_error_reason(.source))]
    InvalidPercent {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Wraps a parse failure with the field it occurred in.
    #[error("invalid {field}: {source}")]
    Field {
        field: FieldPath,
        #[source]
        source: Box<InvoiceError>,
    },

    /// A subtotal's tax amount disagrees with `taxable * percent / 100`.
    #[error("incorrect tax calculation in TaxSubtotal[{index}]: {taxable} * {percent} / 100 != {actual}")]
    TaxMismatch {
        index: usize,
        taxable: i64,
        percent: i64,
        actual: i64,
        expected: i128,
    },

    /// The declared total tax differs from the sum of subtotal taxes.
    #[error("total tax amount ({total}) does not match TaxSubtotal sum ({sum})")]
    TaxSumMismatch { total: i64, sum: i128 },

    /// Line amount plus total tax does not fit in cents.
    #[error("invoice total overflows: {line} + {tax}")]
    TotalOverflow { line: i64, tax: i64 },
}

impl InvoiceError {
    /// Wraps `self` as the cause of a failure in `field`.
    pub fn in_field(self, field: FieldPath) -> Self {
        InvoiceError::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Dotted path of the invoice field this error concerns, if any.
    pub fn field_path(&self) -> Option<String> {
        match self {
            InvoiceError::Field { field, .. } => Some(field.path()),
            InvoiceError::TaxMismatch { index, .. } => {
                Some(FieldPath::SubtotalTaxAmount(*index).path())
            }
            InvoiceError::TaxSumMismatch { .. } => Some(FieldPath::TaxTotalAmount.path()),
            InvoiceError::InvalidDecimal(_)
            | InvoiceError::InvalidPercent { .. }
            | InvoiceError::TotalOverflow { .. } => None,
        }
    }
}

/// Short reason for an integer parse failure, in the wording percent
/// errors have always used.
fn int_error_reason(err: &ParseIntError) -> &'static str {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "value out of range",
        _ => "invalid syntax",
    }
}

/// Errors that abort a batch run.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Failed to open or read the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not syntactically valid JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the CSV report
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: invoice-validator <invoice.json | ->")]
    MissingArgument,
}
