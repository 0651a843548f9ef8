//! Command handlers for the expenses CLI.
//!
//! Each handler loads the collection from the `Store` held by `Config`, applies one operation and,
//! if the collection changed, saves it. Handlers return an `Out` carrying the report text and the
//! records or figures it was built from.

mod add;
mod delete;
mod export;
mod init;
mod menu;
mod search;
mod summary;
mod view;

use crate::model::Expense;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use add::add;
pub use delete::delete;
pub use export::export;
pub use init::init;
pub use menu::menu;
pub use search::search;
pub use summary::summary;
pub use view::view;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to both the command line and the interactive menu.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Formats a record as one line of a listing: date, category, amount, title and note.
fn listing_line(e: &Expense, symbol: &str) -> String {
    format!(
        "{} | {:<10} | {symbol}{:.2} | {} | {}",
        e.date(),
        e.category(),
        e.amount(),
        e.title(),
        e.note()
    )
}
