//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{parse_date, Amount, Expense};
use crate::{Config, Result};
use chrono::{Local, Utc};
use std::str::FromStr;

/// Records a new expense and saves the collection.
///
/// # Arguments
///
/// - `config` - The application configuration holding the store.
/// - `args` - The raw field text. A blank date means today and a blank category means `Other`.
///
/// # Errors
///
/// - `ErrorType::InvalidDate` if the date matches none of the accepted formats.
/// - `ErrorType::InvalidAmount` if the amount is not a number.
/// - `ErrorType::Store` if the collection cannot be saved.
///
/// Nothing is written when validation fails.
pub fn add(config: &Config, args: AddArgs) -> Result<Out<Expense>> {
    let date = match args.date.as_deref().map(str::trim) {
        None | Some("") => Local::now().date_naive(),
        Some(text) => parse_date(text).pub_result(ErrorType::InvalidDate)?,
    };
    let amount = Amount::from_str(&args.amount).pub_result(ErrorType::InvalidAmount)?;

    let store = config.store();
    let mut expenses = store.load();
    let expense = Expense::new(
        expenses.next_id(Utc::now().timestamp_millis()),
        date,
        args.title.trim(),
        args.category.as_deref().unwrap_or_default().trim(),
        amount,
        args.note.as_deref().unwrap_or_default().trim(),
    );
    expenses.push(expense.clone());
    store.save(&expenses).pub_result(ErrorType::Store)?;

    let message = format!("Expense added successfully! (ID: {})", expense.id());
    Ok(Out::new(message, expense))
}
