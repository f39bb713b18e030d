mod category;
mod month;
mod transaction;

pub use category::Category;
pub use month::{CategoryTotal, MonthlyTotal, YearMonth};
pub use transaction::{NewTransaction, Transaction, DATE_FORMAT};
