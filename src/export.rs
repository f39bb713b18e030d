use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::Transaction;
use crate::validate::AMOUNT_DP;

pub(crate) const HEADER: [&str; 5] = ["id", "date", "amount", "category", "description"];

/// Writes a header row plus one row per transaction, in the order given.
/// Returns the number of data rows written.
pub(crate) fn write_csv<W: Write>(writer: W, txns: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in txns {
        wtr.write_record([
            txn.id.to_string(),
            txn.date_iso(),
            format!("{:.2}", txn.amount.round_dp(AMOUNT_DP)),
            txn.category.as_str().to_string(),
            txn.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(txns.len())
}

/// Exports to a file. An empty log leaves the filesystem untouched and
/// reports zero rows.
pub(crate) fn export_to_path(path: &Path, txns: &[Transaction]) -> Result<usize> {
    if txns.is_empty() {
        return Ok(0);
    }
    let file = std::fs::File::create(path)?;
    let count = write_csv(std::io::BufWriter::new(file), txns)?;
    tracing::info!(count, path = %path.display(), "exported transactions");
    Ok(count)
}
