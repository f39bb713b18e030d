//! The tracker owns the store and answers every question the views ask.
//!
//! Mutations pass through [`validate`](crate::validate::validate) first. Reads
//! always start from a full read of the store; nothing derived is kept between
//! calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;

use crate::analytics::{self, Insight};
use crate::db::Database;
use crate::error::Result;
use crate::export;
use crate::models::{Category, CategoryTotal, MonthlyTotal, Transaction};
use crate::validate::{validate, TransactionForm};

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) struct Tracker {
    db: Database,
    today: fn() -> NaiveDate,
}

impl Tracker {
    pub(crate) fn new(db: Database) -> Self {
        Self::with_clock(db, local_today)
    }

    pub(crate) fn with_clock(db: Database, today: fn() -> NaiveDate) -> Self {
        Self { db, today }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        (self.today)()
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Validates the form and stores it. Returns the new id.
    pub(crate) fn add(&self, form: &TransactionForm) -> Result<i64> {
        let txn = validate(form, self.today()).inspect_err(|e| {
            tracing::debug!(reason = %e, "rejected transaction form");
        })?;
        self.db.add_transaction(&txn)
    }

    pub(crate) fn delete_latest(&mut self) -> Result<Option<i64>> {
        self.db.delete_latest_transaction()
    }

    pub(crate) fn delete_all(&self) -> Result<usize> {
        self.db.delete_all_transactions()
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn transactions(&self) -> Result<Vec<Transaction>> {
        self.db.get_all_transactions()
    }

    pub(crate) fn count(&self) -> Result<i64> {
        self.db.get_transaction_count()
    }

    pub(crate) fn total(&self) -> Result<Decimal> {
        self.db.get_total_amount()
    }

    pub(crate) fn monthly_totals(&self) -> Result<Vec<MonthlyTotal>> {
        Ok(analytics::monthly_totals(&self.transactions()?))
    }

    pub(crate) fn monthly_average(&self) -> Result<Decimal> {
        Ok(analytics::monthly_average(&self.transactions()?))
    }

    /// `None` until at least two months have spending.
    pub(crate) fn predict_next_month(&self) -> Result<Option<Decimal>> {
        Ok(analytics::predict_next_month(&self.monthly_totals()?))
    }

    pub(crate) fn category_totals(&self) -> Result<BTreeMap<Category, Decimal>> {
        Ok(analytics::category_totals(&self.transactions()?))
    }

    pub(crate) fn top_categories(&self, n: usize) -> Result<Vec<CategoryTotal>> {
        Ok(analytics::top_categories(&self.transactions()?, n))
    }

    pub(crate) fn insight(&self) -> Result<Insight> {
        Ok(analytics::narrate(&self.monthly_totals()?))
    }

    /// Every figure the views show, computed from one read of the store.
    pub(crate) fn overview(&self) -> Result<Overview> {
        let txns = self.transactions()?;
        tracing::debug!(rows = txns.len(), "recomputing overview");
        Ok(Overview::from_transactions(txns))
    }

    pub(crate) fn export_csv(&self, path: &Path) -> Result<usize> {
        export::export_to_path(path, &self.transactions()?)
    }
}

/// A consistent snapshot of the store plus everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Overview {
    pub transactions: Vec<Transaction>,
    pub total: Decimal,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub monthly_average: Decimal,
    pub prediction: Option<Decimal>,
    pub category_totals: BTreeMap<Category, Decimal>,
    pub top_categories: Vec<CategoryTotal>,
    pub insight: Insight,
}

impl Overview {
    pub(crate) fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let monthly_totals = analytics::monthly_totals(&transactions);
        Self {
            total: analytics::total(&transactions),
            monthly_average: analytics::mean_monthly_total(&monthly_totals),
            prediction: analytics::predict_next_month(&monthly_totals),
            category_totals: analytics::category_totals(&transactions),
            top_categories: analytics::top_categories(&transactions, analytics::DEFAULT_TOP_N),
            insight: analytics::narrate(&monthly_totals),
            monthly_totals,
            transactions,
        }
    }
}

impl Default for Overview {
    fn default() -> Self {
        Self::from_transactions(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::Error;
    use crate::validate::ValidationError;
    use rust_decimal_macros::dec;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn tracker() -> Tracker {
        Tracker::with_clock(Database::open_in_memory().unwrap(), fixed_today)
    }

    fn form(date: &str, amount: &str, category: &str, description: &str) -> TransactionForm {
        TransactionForm {
            date: date.into(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    #[test]
    fn test_empty_overview() {
        let overview = tracker().overview().unwrap();
        assert!(overview.transactions.is_empty());
        assert_eq!(overview.total, Decimal::ZERO);
        assert_eq!(overview.monthly_average, Decimal::ZERO);
        assert_eq!(overview.prediction, None);
        assert!(overview.top_categories.is_empty());
        assert_eq!(overview.insight, Insight::NeedMoreData);
        assert_eq!(overview, Overview::default());
    }

    #[test]
    fn test_add_then_figures_update() {
        let t = tracker();
        t.add(&form("2025-07-01", "20.50", "Food", "Groceries")).unwrap();
        let overview = t.overview().unwrap();
        assert_eq!(overview.transactions.len(), 1);
        assert_eq!(overview.total, dec!(20.50));
        assert_eq!(overview.monthly_average, dec!(20.50));
        assert_eq!(overview.prediction, None);
    }

    #[test]
    fn test_rejected_form_leaves_store_untouched() {
        let t = tracker();
        t.add(&form("2025-07-01", "5", "Food", "ok")).unwrap();

        let err = t.add(&form("2025-07-01", "-5", "Food", "Lunch")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NegativeAmount)
        ));
        let err = t.add(&form("2025-07-01", "5", "Food", "12345")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NumericDescription)
        ));
        let err = t.add(&form("2025-10-02", "5", "Food", "x")).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::FutureDate)));

        assert_eq!(t.count().unwrap(), 1);
        assert_eq!(t.total().unwrap(), dec!(5));
    }

    #[test]
    fn test_oversized_amounts_never_reach_the_figures() {
        let t = tracker();
        t.add(&form("2025-01-10", "0.01", "Food", "")).unwrap();
        let err = t
            .add(&form("2025-02-10", "1000000000000000000000000000", "Food", ""))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AmountTooLarge)
        ));
        let err = t
            .add(&form("2025-02-10", "50000000000000000000000000000", "Food", ""))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AmountTooLarge)
        ));

        t.add(&form("2025-02-10", "1000000000", "Food", "")).unwrap();
        t.add(&form("2025-02-11", "1000000000", "Food", "")).unwrap();
        let overview = t.overview().unwrap();
        assert_eq!(overview.total, dec!(2000000000.01));
        assert_eq!(t.total().unwrap(), dec!(2000000000.01));
        assert_eq!(
            t.insight().unwrap(),
            Insight::Increased {
                percent: dec!(19999999999900)
            }
        );
        assert!(t.predict_next_month().unwrap().is_some());
    }

    #[test]
    fn test_three_month_trend() {
        let t = tracker();
        t.add(&form("2025-01-10", "10", "Food", "")).unwrap();
        t.add(&form("2025-02-15", "20", "Transport", "")).unwrap();
        t.add(&form("2025-03-20", "30", "Food", "")).unwrap();

        let overview = t.overview().unwrap();
        assert_eq!(overview.total, dec!(60));
        assert_eq!(overview.monthly_average, dec!(20));
        assert_eq!(overview.prediction, Some(dec!(40)));
        assert_eq!(overview.insight, Insight::Increased { percent: dec!(50) });
        assert_eq!(overview.top_categories[0].category, Category::Food);

        assert_eq!(t.predict_next_month().unwrap(), Some(dec!(40)));
        assert_eq!(t.monthly_average().unwrap(), dec!(20));
        assert_eq!(t.insight().unwrap(), overview.insight);
        assert_eq!(t.category_totals().unwrap(), overview.category_totals);
        assert_eq!(t.top_categories(1).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_latest_recomputes() {
        let mut t = tracker();
        t.add(&form("2025-01-10", "100", "Food", "")).unwrap();
        t.add(&form("2025-02-10", "150", "Food", "")).unwrap();
        assert_eq!(
            t.insight().unwrap(),
            Insight::Increased { percent: dec!(50) }
        );

        assert_eq!(t.delete_latest().unwrap(), Some(2));
        let overview = t.overview().unwrap();
        assert_eq!(overview.total, dec!(100));
        assert_eq!(overview.insight, Insight::NeedMoreData);
        assert_eq!(overview.prediction, None);
    }

    #[test]
    fn test_delete_all_resets_figures() {
        let t = tracker();
        t.add(&form("2025-01-10", "10", "Food", "")).unwrap();
        t.add(&form("2025-02-10", "10", "Drinks", "")).unwrap();
        assert_eq!(t.delete_all().unwrap(), 2);
        assert_eq!(t.overview().unwrap(), Overview::default());
    }

    #[test]
    fn test_overview_total_matches_store_sum() {
        let t = tracker();
        t.add(&form("2025-03-01", "0.10", "Food", "")).unwrap();
        t.add(&form("2025-03-02", "0.20", "Food", "")).unwrap();
        assert_eq!(t.overview().unwrap().total, t.total().unwrap());
        assert_eq!(t.total().unwrap(), dec!(0.30));
    }

    #[test]
    fn test_export_csv() {
        let t = tracker();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        assert_eq!(t.export_csv(&path).unwrap(), 0);
        assert!(!path.exists());

        t.add(&form("2025-01-10", "10", "Food", "Lunch")).unwrap();
        assert_eq!(t.export_csv(&path).unwrap(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("1,2025-01-10,10.00,Food,Lunch"));
    }

    #[test]
    fn test_exported_amounts_match_store() {
        let t = tracker();
        let err = t.add(&form("2025-01-10", "0.005", "Food", "")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AmountTooPrecise)
        ));
        t.add(&form("2025-01-10", "0.01", "Food", "")).unwrap();
        t.add(&form("2025-01-11", "12.345e1", "Drinks", "")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        t.export_csv(&path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let exported: Vec<Decimal> = rdr
            .records()
            .map(|r| r.unwrap()[2].parse().unwrap())
            .collect();
        let stored: Vec<Decimal> = t.transactions().unwrap().iter().map(|txn| txn.amount).collect();
        assert_eq!(exported, stored);
        assert_eq!(exported, vec![dec!(123.45), dec!(0.01)]);
    }
}
