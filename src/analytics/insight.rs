use rust_decimal::Decimal;

use crate::models::MonthlyTotal;

/// Month-over-month trend between the two most recent buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Insight {
    NeedMoreData,
    Increased { percent: Decimal },
    Decreased { percent: Decimal },
    Unchanged,
    /// Previous month summed to zero, so a percentage is undefined.
    IncreasedFromZero,
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NeedMoreData => write!(f, "Add more transactions to see spending trends."),
            Self::Increased { percent } => write!(
                f,
                "Spending increased by {percent}% vs last month - try reviewing your big categories."
            ),
            Self::Decreased { percent } => {
                write!(f, "Spending decreased by {percent}% - nice work staying on track!")
            }
            Self::Unchanged => write!(f, "Spending stayed the same as last month."),
            Self::IncreasedFromZero => write!(
                f,
                "Spending increased from nothing last month - no percentage to compare."
            ),
        }
    }
}

/// Percentages are whole numbers, rounded half-to-even.
pub(crate) fn narrate(monthly: &[MonthlyTotal]) -> Insight {
    let [.., previous, last] = monthly else {
        return Insight::NeedMoreData;
    };
    let change = last.amount - previous.amount;
    if change.is_zero() {
        return Insight::Unchanged;
    }
    if previous.amount.is_zero() {
        return Insight::IncreasedFromZero;
    }
    let percent = (change / previous.amount * Decimal::ONE_HUNDRED)
        .abs()
        .round_dp(0);
    if change > Decimal::ZERO {
        Insight::Increased { percent }
    } else {
        Insight::Decreased { percent }
    }
}
