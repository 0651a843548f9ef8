//! Types that represent the core data model, such as `Expense` and `Expenses`.
mod amount;
mod date;
mod expense;
mod export;
mod summary;

pub use amount::{Amount, AmountError};
pub use date::{parse_date, DateError, DATE_FORMATS};
pub use expense::{Expense, Expenses, DEFAULT_CATEGORY};
pub(crate) use export::CsvRecord;
pub use export::EXPORT_HEADERS;
pub use summary::{CategoryTotal, MonthlySummary};

#[cfg(test)]
pub(crate) use expense::tests::{expense, sample};
