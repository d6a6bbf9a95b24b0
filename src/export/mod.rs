//! CSV export of the transaction collection.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;
use crate::store::Store;

pub const HEADER: [&str; 7] = [
    "id",
    "year",
    "month",
    "transaction_type",
    "earned",
    "owed",
    "paid",
];

/// Write `transactions` as CSV, keeping only `year` when given.
/// Returns the number of data rows written.
pub fn write_transactions<W: Write>(
    transactions: &[Transaction],
    year: Option<i32>,
    out: W,
) -> Result<usize> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    let mut count = 0;
    for txn in transactions
        .iter()
        .filter(|t| year.map_or(true, |y| t.year == y))
    {
        wtr.write_record([
            txn.id.map(|id| id.to_string()).unwrap_or_default().as_str(),
            &txn.year.to_string(),
            txn.month.as_str(),
            &txn.transaction_type,
            &txn.earned,
            &txn.owed,
            if txn.paid { "true" } else { "false" },
        ])?;
        count += 1;
    }

    wtr.flush()?;
    Ok(count)
}

/// Export everything in `store` to a CSV file at `path`.
pub fn export_to_csv(store: &dyn Store, path: &Path, year: Option<i32>) -> Result<usize> {
    let transactions = store.get_transactions()?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_transactions(&transactions, year, file)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    tracing::info!(path = %path.display(), count, ?year, "exported transactions");
    Ok(count)
}
