//! # Invoice Validator
//!
//! Checks the tax arithmetic of simplified e-invoices and computes their
//! grand totals in exact fixed-point cents.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Amounts are `i64` cents; parsing goes through `rust_decimal`
//! - **Truncation, never rounding**: Digits past the second decimal place are dropped
//! - **First error wins**: Validation stops at the first inconsistency, in document order
//! - **Pure core**: Parsing and validation do no I/O and no logging
//!
//! ## Example
//!
//! ```
//! use invoice_validator::{calculate_invoice_total, format_cents_to_decimal};
//! use invoice_validator::{Invoice, TaxSubtotal, TaxTotal};
//!
//! let invoice = Invoice::new(
//!     "1500.00",
//!     TaxTotal::new("200.00", vec![TaxSubtotal::new("1000.00", "200.00", "S", "20")]),
//! );
//! let total = calculate_invoice_total(&invoice).unwrap();
//! assert_eq!(format_cents_to_decimal(total), "1700.00");
//! ```

pub mod batch;
pub mod decimal;
pub mod error;
pub mod invoice;
pub mod validator;

pub use batch::{InvoiceBatch, InvoiceReport, ReportStatus};
pub use decimal::{format_cents_to_decimal, parse_decimal_to_cents, Cents};
pub use error::{BatchError, BatchResult, FieldPath, InvoiceError, Result};
pub use invoice::{Invoice, TaxCategory, TaxSubtotal, TaxTotal};
pub use validator::calculate_invoice_total;
