pub(crate) mod insights;
pub(crate) mod transactions;
