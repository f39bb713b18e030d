use rust_decimal::Decimal;

use crate::models::MonthlyTotal;

/// Fewest monthly buckets a trend line can be fitted through.
pub(crate) const MIN_MONTHS: usize = 2;

/// Decimal places kept in a prediction. Repeating fractions from the fit would
/// otherwise leave 28-digit tails such as 39.999….
const PREDICTION_DP: u32 = 12;

/// Ordinary least-squares line through `(i, y[i])` for `i = 0, 1, 2, …`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinearFit {
    pub(crate) slope: Decimal,
    pub(crate) intercept: Decimal,
}

impl LinearFit {
    /// `None` with fewer than two points, where the slope is undefined.
    pub(crate) fn from_series(ys: &[Decimal]) -> Option<Self> {
        if ys.len() < MIN_MONTHS {
            return None;
        }
        let n = Decimal::from(ys.len());
        let (mut sx, mut sy, mut sxx, mut sxy) =
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        for (i, y) in ys.iter().enumerate() {
            let x = Decimal::from(i);
            sx += x;
            sy += *y;
            sxx += x * x;
            sxy += x * *y;
        }
        // Positive for any two or more distinct x values.
        let denom = n * sxx - sx * sx;
        let slope = (n * sxy - sx * sy) / denom;
        let intercept = (sy - slope * sx) / n;
        Some(Self { slope, intercept })
    }

    pub(crate) fn at(&self, x: Decimal) -> Decimal {
        self.intercept + self.slope * x
    }
}

/// Extrapolates the monthly series one step past its last bucket.
///
/// Buckets are treated as evenly spaced even when calendar months were
/// skipped. `None` means there is not enough history yet, which callers show
/// as a normal state. The result is not clamped and can be negative when
/// spending falls steeply.
pub(crate) fn predict_next_month(monthly: &[MonthlyTotal]) -> Option<Decimal> {
    let ys: Vec<Decimal> = monthly.iter().map(|m| m.amount).collect();
    let fit = LinearFit::from_series(&ys)?;
    Some(
        fit.at(Decimal::from(ys.len()))
            .round_dp(PREDICTION_DP)
            .normalize(),
    )
}
