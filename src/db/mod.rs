mod schema;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::*;
use crate::validate::MAX_AMOUNT;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::info!(path = %path.display(), "opened transaction store");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        if current > schema::CURRENT_VERSION {
            return Err(Error::SchemaVersion {
                found: current,
                supported: schema::CURRENT_VERSION,
            });
        }

        let tx = self.conn.transaction()?;
        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tx.execute_batch(sql)?;
            }
        }
        if current < schema::CURRENT_VERSION {
            tx.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(
                from = current,
                to = schema::CURRENT_VERSION,
                "migrated schema"
            );
        }
        tx.commit()?;

        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    /// Appends a validated transaction and returns the id the store assigned.
    pub(crate) fn add_transaction(&self, txn: &NewTransaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (date, amount, category, description)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                txn.date.format(DATE_FORMAT).to_string(),
                txn.amount.to_string(),
                txn.category.as_str(),
                txn.description,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, category = %txn.category, amount = %txn.amount, "added transaction");
        Ok(id)
    }

    /// All transactions, newest date first. Same-day entries keep the most
    /// recently added first.
    pub(crate) fn get_all_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, category, description
             FROM transactions
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RawTransaction {
                id: row.get(0)?,
                date: row.get(1)?,
                amount: row.get(2)?,
                category: row.get(3)?,
                description: row.get(4)?,
            })
        })?;
        let raw = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawTransaction::decode).collect()
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// Removes the transaction with the highest id, which is the one added
    /// last regardless of its date.
    pub(crate) fn delete_latest_transaction(&mut self) -> Result<Option<i64>> {
        let tx = self.conn.transaction()?;
        let latest: Option<i64> =
            tx.query_row("SELECT MAX(id) FROM transactions", [], |row| row.get(0))?;
        if let Some(id) = latest {
            tx.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
            tx.commit()?;
            tracing::info!(id, "deleted latest transaction");
        }
        Ok(latest)
    }

    pub(crate) fn delete_all_transactions(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM transactions", [])?;
        tracing::info!(removed, "deleted all transactions");
        Ok(removed)
    }

    /// Exact decimal sum of every stored amount.
    pub(crate) fn get_total_amount(&self) -> Result<Decimal> {
        let mut stmt = self.conn.prepare("SELECT id, amount FROM transactions")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut total = Decimal::ZERO;
        for row in rows {
            let (id, amount) = row?;
            total += decode_amount(id, &amount)?;
        }
        Ok(total)
    }
}

/// A row as stored, before its text columns are decoded.
struct RawTransaction {
    id: i64,
    date: String,
    amount: String,
    category: String,
    description: String,
}

impl RawTransaction {
    fn decode(self) -> Result<Transaction> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            Error::CorruptRecord {
                id: self.id,
                reason: format!("bad date '{}': {e}", self.date),
            }
        })?;
        let amount = decode_amount(self.id, &self.amount)?;
        let category = Category::parse(&self.category).ok_or_else(|| Error::CorruptRecord {
            id: self.id,
            reason: format!("unknown category '{}'", self.category),
        })?;
        Ok(Transaction {
            id: self.id,
            date,
            amount,
            category,
            description: self.description,
        })
    }
}

fn decode_amount(id: i64, raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw).map_err(|e| Error::CorruptRecord {
        id,
        reason: format!("bad amount '{raw}': {e}"),
    })?;
    if amount < Decimal::ZERO {
        return Err(Error::CorruptRecord {
            id,
            reason: format!("negative amount {amount}"),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(Error::CorruptRecord {
            id,
            reason: format!("amount {amount} exceeds {MAX_AMOUNT}"),
        });
    }
    Ok(amount)
}

#[cfg(test)]
mod tests;
