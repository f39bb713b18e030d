//! Derived figures over the full transaction log.
//!
//! Everything here is a pure function of the rows passed in. Nothing is cached
//! between calls, so callers always get figures consistent with the store as
//! of their last read.

mod categories;
mod forecast;
mod insight;
mod monthly;

pub(crate) use categories::{category_totals, top_categories, DEFAULT_TOP_N};
pub(crate) use forecast::predict_next_month;
#[cfg(test)]
pub(crate) use forecast::LinearFit;
pub(crate) use insight::{narrate, Insight};
pub(crate) use monthly::{mean_monthly_total, monthly_average, monthly_totals, total};
