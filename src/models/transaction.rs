use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Category, YearMonth};

/// Storage and export format for dates. Sorts lexically in date order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A transaction that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl Transaction {
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    pub fn date_iso(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
