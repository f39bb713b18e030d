#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn new_txn(date: &str, amount: Decimal, category: Category, description: &str) -> NewTransaction {
    NewTransaction {
        date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
        amount,
        category,
        description: description.into(),
    }
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_all_transactions().unwrap().is_empty());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-01-01", dec!(5), Category::Food, "x"))
        .unwrap();
    db.migrate().unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

#[test]
fn test_newer_schema_version_is_rejected() {
    let mut db = Database::open_in_memory().unwrap();
    db.conn
        .execute("UPDATE schema_version SET version = 99", [])
        .unwrap();
    let err = db.migrate().unwrap_err();
    assert!(matches!(err, Error::SchemaVersion { found: 99, .. }));
}

// ── Add / read ────────────────────────────────────────────────

#[test]
fn test_add_transaction_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .add_transaction(&new_txn("2025-09-09", dec!(10), Category::Food, "Lunch"))
        .unwrap();
    assert_eq!(id, 1);

    let all = db.get_all_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[0].date_iso(), "2025-09-09");
    assert_eq!(all[0].amount, dec!(10));
    assert_eq!(all[0].category, Category::Food);
    assert_eq!(all[0].description, "Lunch");
}

#[test]
fn test_ids_increase_by_one() {
    let db = Database::open_in_memory().unwrap();
    let ids: Vec<i64> = (0..5)
        .map(|i| {
            db.add_transaction(&new_txn(
                "2025-03-01",
                Decimal::from(i),
                Category::Other,
                "",
            ))
            .unwrap()
        })
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_all_ordered_by_date_desc_then_id_desc() {
    let db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-01-10", dec!(1), Category::Food, "a"))
        .unwrap();
    db.add_transaction(&new_txn("2025-03-05", dec!(2), Category::Food, "b"))
        .unwrap();
    db.add_transaction(&new_txn("2025-01-10", dec!(3), Category::Food, "c"))
        .unwrap();
    db.add_transaction(&new_txn("2024-12-31", dec!(4), Category::Food, "d"))
        .unwrap();

    let descs: Vec<String> = db
        .get_all_transactions()
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(descs, vec!["b", "c", "a", "d"]);
}

#[test]
fn test_empty_description_allowed() {
    let db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-01-10", dec!(1), Category::Drinks, ""))
        .unwrap();
    assert_eq!(db.get_all_transactions().unwrap()[0].description, "");
}

#[test]
fn test_amount_precision_preserved() {
    let db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-01-10", dec!(20.50), Category::Food, "x"))
        .unwrap();
    db.add_transaction(&new_txn("2025-01-11", dec!(0.10), Category::Food, "y"))
        .unwrap();
    db.add_transaction(&new_txn("2025-01-12", dec!(0.20), Category::Food, "z"))
        .unwrap();
    assert_eq!(db.get_total_amount().unwrap(), dec!(20.80));
}

// ── Delete latest ─────────────────────────────────────────────

#[test]
fn test_delete_latest_removes_highest_id() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-09-09", dec!(10), Category::Food, "Lunch"))
        .unwrap();
    let latest = db
        .add_transaction(&new_txn("2025-09-09", dec!(20), Category::Drinks, "Bar"))
        .unwrap();

    assert_eq!(db.delete_latest_transaction().unwrap(), Some(latest));

    let remaining = db.get_all_transactions().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].id, latest);
}

#[test]
fn test_delete_latest_uses_insertion_order_not_date() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-06-01", dec!(10), Category::Food, "recent"))
        .unwrap();
    let backdated = db
        .add_transaction(&new_txn("2024-01-01", dec!(5), Category::Food, "backdated"))
        .unwrap();

    assert_eq!(db.delete_latest_transaction().unwrap(), Some(backdated));
    let remaining = db.get_all_transactions().unwrap();
    assert_eq!(remaining[0].description, "recent");
}

#[test]
fn test_delete_latest_on_empty_store() {
    let mut db = Database::open_in_memory().unwrap();
    assert_eq!(db.delete_latest_transaction().unwrap(), None);
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

// ── Delete all / total ────────────────────────────────────────

#[test]
fn test_delete_all_then_total_is_zero() {
    let db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-01-01", dec!(12.5), Category::Transport, "bus"))
        .unwrap();
    db.add_transaction(&new_txn("2025-02-01", dec!(7.5), Category::Transport, "train"))
        .unwrap();

    assert_eq!(db.delete_all_transactions().unwrap(), 2);
    assert!(db.get_all_transactions().unwrap().is_empty());
    assert_eq!(db.get_total_amount().unwrap(), Decimal::ZERO);
}

#[test]
fn test_ids_not_reused_after_delete_all() {
    let db = Database::open_in_memory().unwrap();
    db.add_transaction(&new_txn("2025-01-01", dec!(1), Category::Food, ""))
        .unwrap();
    db.add_transaction(&new_txn("2025-01-01", dec!(1), Category::Food, ""))
        .unwrap();
    db.delete_all_transactions().unwrap();
    let id = db
        .add_transaction(&new_txn("2025-01-01", dec!(1), Category::Food, ""))
        .unwrap();
    assert_eq!(id, 3);
}

#[test]
fn test_total_on_empty_store() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_total_amount().unwrap(), Decimal::ZERO);
}

#[test]
fn test_total_matches_sum_over_all() {
    let db = Database::open_in_memory().unwrap();
    for (date, amount) in [
        ("2025-01-03", dec!(10.10)),
        ("2025-01-20", dec!(20.20)),
        ("2025-02-14", dec!(33.33)),
        ("2025-04-01", dec!(0)),
    ] {
        db.add_transaction(&new_txn(date, amount, Category::Entertainment, "x"))
            .unwrap();
    }
    let sum: Decimal = db
        .get_all_transactions()
        .unwrap()
        .iter()
        .map(|t| t.amount)
        .sum();
    assert_eq!(db.get_total_amount().unwrap(), sum);
    assert_eq!(sum, dec!(63.63));
}

// ── Corruption ────────────────────────────────────────────────

#[test]
fn test_corrupt_amount_is_reported() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (date, amount, category, description)
             VALUES ('2025-01-01', 'lots', 'Food', '')",
            [],
        )
        .unwrap();
    let err = db.get_all_transactions().unwrap_err();
    assert!(matches!(err, Error::CorruptRecord { id: 1, .. }));
    assert!(db.get_total_amount().is_err());
}

#[test]
fn test_corrupt_category_is_reported() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (date, amount, category, description)
             VALUES ('2025-01-01', '3.00', 'Groceries', '')",
            [],
        )
        .unwrap();
    let err = db.get_all_transactions().unwrap_err();
    assert!(err.to_string().contains("Groceries"));
}

#[test]
fn test_negative_stored_amount_is_reported() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (date, amount, category, description)
             VALUES ('2025-01-01', '-3.00', 'Food', '')",
            [],
        )
        .unwrap();
    assert!(matches!(
        db.get_total_amount().unwrap_err(),
        Error::CorruptRecord { .. }
    ));
}

#[test]
fn test_oversized_stored_amount_is_reported() {
    let db = Database::open_in_memory().unwrap();
    for day in ["2025-01-01", "2025-01-02"] {
        db.conn
            .execute(
                "INSERT INTO transactions (date, amount, category, description)
                 VALUES (?1, '50000000000000000000000000000', 'Food', '')",
                [day],
            )
            .unwrap();
    }
    assert!(matches!(
        db.get_total_amount().unwrap_err(),
        Error::CorruptRecord { id: 1, .. }
    ));
    assert!(db.get_all_transactions().is_err());
}

// ── Durability ────────────────────────────────────────────────

#[test]
fn test_transactions_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.db");

    {
        let db = Database::open(&path).unwrap();
        db.add_transaction(&new_txn("2025-05-05", dec!(42), Category::Holidays, "Hotel"))
            .unwrap();
    }

    let mut db = Database::open(&path).unwrap();
    let all = db.get_all_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "Hotel");
    assert_eq!(db.delete_latest_transaction().unwrap(), Some(1));
}
