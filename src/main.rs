//! Invoice Validator CLI
//!
//! Reads invoice JSON documents, validates their tax arithmetic and writes
//! one CSV report row per invoice.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- invoices.json > report.csv
//! cat invoices.json | cargo run -- - > report.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use invoice_validator::{BatchError, BatchResult, InvoiceBatch};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> BatchResult<()> {
    let input_path = env::args().nth(1).ok_or(BatchError::MissingArgument)?;

    let mut batch = InvoiceBatch::new();
    if input_path == "-" {
        batch.process_json(io::stdin().lock())?;
    } else {
        let file = File::open(&input_path)?;
        batch.process_json(BufReader::new(file))?;
    }

    info!(
        "Validated {} invoice(s): {} valid, {} invalid",
        batch.reports().len(),
        batch.valid_count(),
        batch.invalid_count()
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    batch.write_output(handle)?;

    Ok(())
}
