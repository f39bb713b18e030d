use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{MonthlyTotal, Transaction, YearMonth};

pub(crate) fn total(txns: &[Transaction]) -> Decimal {
    txns.iter().map(|t| t.amount).sum()
}

/// Buckets transactions by calendar month, oldest month first. Months with no
/// transactions are absent rather than zero-filled.
pub(crate) fn monthly_totals(txns: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for txn in txns {
        *buckets.entry(txn.month()).or_default() += txn.amount;
    }
    buckets
        .into_iter()
        .map(|(month, amount)| MonthlyTotal { month, amount })
        .collect()
}

pub(crate) fn monthly_average(txns: &[Transaction]) -> Decimal {
    mean_monthly_total(&monthly_totals(txns))
}

/// Mean of already-bucketed totals; zero when there are none.
pub(crate) fn mean_monthly_total(monthly: &[MonthlyTotal]) -> Decimal {
    if monthly.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = monthly.iter().map(|m| m.amount).sum();
    sum / Decimal::from(monthly.len())
}
