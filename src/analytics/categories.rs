use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Category, CategoryTotal, Transaction};

pub(crate) const DEFAULT_TOP_N: usize = 3;

/// Per-category sums. Categories with no transactions are left out.
pub(crate) fn category_totals(txns: &[Transaction]) -> BTreeMap<Category, Decimal> {
    let mut totals: BTreeMap<Category, Decimal> = BTreeMap::new();
    for txn in txns {
        *totals.entry(txn.category).or_default() += txn.amount;
    }
    totals
}

/// Biggest categories first; equal amounts fall back to name order so the
/// ranking is stable.
pub(crate) fn top_categories(txns: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut ranked: Vec<CategoryTotal> = category_totals(txns)
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    ranked.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    ranked.truncate(n);
    ranked
}
