//! Checks raw entry-form input before anything is written to the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Category, NewTransaction, DATE_FORMAT};

/// Date layouts accepted from the entry form. The first is the storage format;
/// the others are the day-first layouts a date picker typically produces.
const INPUT_DATE_FORMATS: &[&str] = &[DATE_FORMAT, "%d-%m-%Y", "%d/%m/%Y"];

/// Largest single amount the form accepts. Sums over any realistic number of
/// rows stay far inside `Decimal`'s range at this bound.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Amounts are whole pennies, so stored and exported figures agree.
pub(crate) const AMOUNT_DP: u32 = 2;

/// Raw, unparsed form fields exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields must be filled in.")]
    MissingField,

    #[error("Amount must be a number.")]
    AmountNotNumber,

    #[error("Amount must be a positive number.")]
    NegativeAmount,

    #[error("Amount can have at most 2 decimal places.")]
    AmountTooPrecise,

    #[error("Amount must not exceed 1,000,000,000.")]
    AmountTooLarge,

    #[error("Description must not be a number.")]
    NumericDescription,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Date must be a valid date (YYYY-MM-DD or DD-MM-YYYY).")]
    InvalidDate,

    #[error("Date cannot be in the future.")]
    FutureDate,
}

/// Runs every rule in order and stops at the first failure.
pub fn validate(form: &TransactionForm, today: NaiveDate) -> Result<NewTransaction, ValidationError> {
    let date = form.date.trim();
    let amount = form.amount.trim();
    let category = form.category.trim();
    let description = form.description.trim();

    if date.is_empty() || amount.is_empty() || category.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let amount = parse_amount(amount)?;

    if is_numeric(description) {
        return Err(ValidationError::NumericDescription);
    }

    let category = Category::parse(category)
        .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))?;

    let date = parse_date(date).ok_or(ValidationError::InvalidDate)?;
    if date > today {
        return Err(ValidationError::FutureDate);
    }

    Ok(NewTransaction {
        date,
        amount,
        category,
        description: description.to_string(),
    })
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::AmountNotNumber)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount);
    }
    if amount.normalize().scale() > AMOUNT_DP {
        return Err(ValidationError::AmountTooPrecise);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// True for a non-empty string made only of numeric characters.
fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
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
    fn test_valid_form() {
        let txn = validate(&form("2025-07-01", "20.50", "Food", "Groceries"), today()).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(txn.amount, dec!(20.50));
        assert_eq!(txn.category, Category::Food);
        assert_eq!(txn.description, "Groceries");
    }

    #[test]
    fn test_day_first_date_normalized() {
        let txn = validate(&form("01-07-2025", "20.50", "Food", "Groceries"), today()).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());

        let txn = validate(&form("01/07/2025", "1", "food", ""), today()).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_empty_description_allowed() {
        let txn = validate(&form("2025-07-01", "3", "Drinks", ""), today()).unwrap();
        assert_eq!(txn.description, "");
    }

    #[test]
    fn test_zero_amount_allowed() {
        let txn = validate(&form("2025-07-01", "0", "Other", "free sample"), today()).unwrap();
        assert_eq!(txn.amount, Decimal::ZERO);
    }

    #[test]
    fn test_missing_amount() {
        assert_eq!(
            validate(&form("2025-07-01", "", "Food", "Groceries"), today()),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn test_only_description_filled() {
        assert_eq!(
            validate(&form("", "", "", "Groceries"), today()),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        assert_eq!(
            validate(&form("2025-07-01", "5", "   ", ""), today()),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            validate(&form("2025-07-01", "-5", "Food", "Lunch"), today()),
            Err(ValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        assert_eq!(
            validate(&form("2025-07-01", "five", "Food", "Lunch"), today()),
            Err(ValidationError::AmountNotNumber)
        );
        assert_eq!(
            validate(&form("2025-07-01", "£5", "Food", "Lunch"), today()),
            Err(ValidationError::AmountNotNumber)
        );
    }

    #[test]
    fn test_scientific_amount_accepted() {
        let txn = validate(&form("2025-07-01", "1.5e2", "Food", "Lunch"), today()).unwrap();
        assert_eq!(txn.amount, dec!(150));
    }

    #[test]
    fn test_amount_upper_bound() {
        let txn = validate(&form("2025-07-01", "1000000000", "Other", "car"), today()).unwrap();
        assert_eq!(txn.amount, MAX_AMOUNT);
        assert_eq!(
            validate(&form("2025-07-01", "1000000000.01", "Other", "car"), today()),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(
            validate(&form("2025-07-01", "1000000000000000000000000000", "Food", "x"), today()),
            Err(ValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn test_sub_penny_amount_rejected() {
        assert_eq!(
            validate(&form("2025-07-01", "0.005", "Food", "x"), today()),
            Err(ValidationError::AmountTooPrecise)
        );
        assert_eq!(
            validate(&form("2025-07-01", "1e-3", "Food", "x"), today()),
            Err(ValidationError::AmountTooPrecise)
        );
        let txn = validate(&form("2025-07-01", "4.500", "Food", "x"), today()).unwrap();
        assert_eq!(txn.amount, dec!(4.5));
    }

    #[test]
    fn test_numeric_description_rejected() {
        assert_eq!(
            validate(&form("2025-07-01", "5", "Food", "12345"), today()),
            Err(ValidationError::NumericDescription)
        );
    }

    #[test]
    fn test_description_with_digits_and_text_allowed() {
        assert!(validate(&form("2025-07-01", "5", "Food", "Bus 42"), today()).is_ok());
        assert!(validate(&form("2025-07-01", "5", "Food", "12.50"), today()).is_ok());
    }

    #[test]
    fn test_amount_rule_wins_over_description_rule() {
        assert_eq!(
            validate(&form("2025-07-01", "-1", "Food", "12345"), today()),
            Err(ValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert_eq!(
            validate(&form("2025-07-01", "5", "Rent", "May"), today()),
            Err(ValidationError::UnknownCategory("Rent".into()))
        );
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert_eq!(
            validate(&form("2025-02-30", "5", "Food", "x"), today()),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(
            validate(&form("yesterday", "5", "Food", "x"), today()),
            Err(ValidationError::InvalidDate)
        );
    }

    #[test]
    fn test_future_date_rejected() {
        assert_eq!(
            validate(&form("2025-10-02", "5", "Food", "x"), today()),
            Err(ValidationError::FutureDate)
        );
        assert!(validate(&form("2025-10-01", "5", "Food", "x"), today()).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "All fields must be filled in."
        );
        assert_eq!(
            ValidationError::NumericDescription.to_string(),
            "Description must not be a number."
        );
    }
}
