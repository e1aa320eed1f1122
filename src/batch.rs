//! Batch validation of invoice documents.
//!
//! Reads a stream of JSON documents, validates every invoice it contains and
//! collects one report row per invoice. Invoices that fail validation are
//! logged and reported, never fatal; only unreadable input aborts a run.

use crate::decimal::format_cents_to_decimal;
use crate::error::{BatchError, BatchResult};
use crate::invoice::Invoice;
use crate::validator::calculate_invoice_total;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};

/// Outcome of validating one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Valid,
    Invalid,
}

/// One row of the batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceReport {
    /// 1-based position of the invoice in the input.
    pub invoice: usize,

    pub status: ReportStatus,

    /// Grand total as a decimal string; `0.00` when invalid.
    pub total: String,

    /// Dotted path of the offending field, when the error names one.
    pub field: Option<String>,

    pub error: Option<String>,
}

impl InvoiceReport {
    fn rejected(invoice: usize, field: Option<String>, error: String) -> Self {
        InvoiceReport {
            invoice,
            status: ReportStatus::Invalid,
            total: format_cents_to_decimal(0),
            field,
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ReportStatus::Valid
    }
}

/// Validates invoices in input order and keeps their reports.
///
/// # Output Ordering
///
/// Reports are written in the order invoices were read, so output is
/// deterministic for a given input.
#[derive(Debug, Default)]
pub struct InvoiceBatch {
    reports: Vec<InvoiceReport>,
}

impl InvoiceBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        InvoiceBatch {
            reports: Vec::new(),
        }
    }

    /// Processes whitespace-separated JSON documents from `reader`.
    ///
    /// Each document is either an invoice object or an array of them.
    /// Documents with the wrong shape are reported as invalid and skipped;
    /// a JSON syntax error or a failed read stops processing.
    pub fn process_json<R: Read>(&mut self, reader: R) -> BatchResult<()> {
        let documents = serde_json::Deserializer::from_reader(reader).into_iter::<Value>();

        for document in documents {
            let document = document.map_err(|e| {
                if e.is_io() {
                    BatchError::Io(e.into())
                } else {
                    BatchError::Json(e)
                }
            })?;

            match document {
                Value::Array(items) => {
                    for item in items {
                        self.process_value(item);
                    }
                }
                other => self.process_value(other),
            }
        }

        Ok(())
    }

    fn process_value(&mut self, value: Value) {
        match serde_json::from_value::<Invoice>(value) {
            Ok(invoice) => {
                self.process_invoice(&invoice);
            }
            Err(e) => {
                let seq = self.next_seq();
                warn!("Invoice {}: malformed document: {}", seq, e);
                self.reports
                    .push(InvoiceReport::rejected(seq, None, format!("malformed invoice: {}", e)));
            }
        }
    }

    /// Validates a single invoice and records its report.
    pub fn process_invoice(&mut self, invoice: &Invoice) -> &InvoiceReport {
        let seq = self.next_seq();

        let report = match calculate_invoice_total(invoice) {
            Ok(total) => {
                let total = format_cents_to_decimal(total);
                debug!("Invoice {}: valid, total {}", seq, total);
                InvoiceReport {
                    invoice: seq,
                    status: ReportStatus::Valid,
                    total,
                    field: None,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Invoice {}: {}", seq, e);
                InvoiceReport::rejected(seq, e.field_path(), e.to_string())
            }
        };

        self.reports.push(report);
        &self.reports[self.reports.len() - 1]
    }

    fn next_seq(&self) -> usize {
        self.reports.len() + 1
    }

    pub fn reports(&self) -> &[InvoiceReport] {
        &self.reports
    }

    pub fn valid_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.reports.len() - self.valid_count()
    }

    /// Writes all reports as CSV with header `invoice,status,total,field,error`.
    pub fn write_output<W: Write>(&self, writer: W) -> BatchResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.reports.is_empty() {
            csv_writer.write_record(["invoice", "status", "total", "field", "error"])?;
        }
        for report in &self.reports {
            csv_writer.serialize(report)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
