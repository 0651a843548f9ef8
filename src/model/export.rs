use crate::model::Expense;
use serde::{Deserialize, Serialize};

/// The column names of the CSV export, in order.
pub const EXPORT_HEADERS: [&str; 6] = ["id", "date", "title", "category", "amount", "note"];

/// One row of the CSV export. Field order determines column order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct CsvRecord {
    pub(crate) id: i64,
    pub(crate) date: String,
    pub(crate) title: String,
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) note: String,
}

impl From<&Expense> for CsvRecord {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id(),
            date: e.date().to_string(),
            title: e.title().to_string(),
            category: e.category().to_string(),
            amount: e.amount().value().normalize().to_string(),
            note: e.note().to_string(),
        }
    }
}
