//! View command handler.

use crate::commands::{listing_line, Out};
use crate::model::Expense;
use crate::{Config, Result};

/// Lists every expense, newest first, followed by the total of all amounts.
///
/// Records that share a date keep the order in which they were added. The structured output holds
/// the records in the listed order.
pub fn view(config: &Config) -> Result<Out<Vec<Expense>>> {
    let expenses = config.store().load();
    if expenses.is_empty() {
        return Ok("No expenses yet.".into());
    }

    let symbol = config.currency_symbol();
    let sorted: Vec<Expense> = expenses.sorted_by_date_desc().into_iter().cloned().collect();
    let mut lines: Vec<String> = sorted.iter().map(|e| listing_line(e, symbol)).collect();
    lines.push(format!("Total spent: {symbol}{:.2}", expenses.total()));

    Ok(Out::new(lines.join("\n"), sorted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{expense, Expenses};
    use crate::test::TestEnv;

    #[test]
    fn test_view_empty() {
        let env = TestEnv::new();
        let out = view(env.config()).unwrap();
        assert_eq!(out.message(), "No expenses yet.");
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_view_sorted_with_total() {
        let env = TestEnv::with_sample();
        let out = view(env.config()).unwrap();

        let ids: Vec<i64> = out.structure().unwrap().iter().map(Expense::id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let lines: Vec<&str> = out.message().lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("2024-02-01 | Transport  | ₹5.00 | item 3"));
        assert!(lines[2].starts_with("2024-01-05 | Food       | ₹10.00 | item 1"));
        assert_eq!(lines[3], "Total spent: ₹35.00");
    }

    #[test]
    fn test_view_total_of_largest_amounts() {
        let env = TestEnv::new();
        env.save(Expenses::new(vec![
            expense(1, "2024-01-01", "Rent", "99999999999999.9"),
            expense(2, "2024-01-02", "Rent", "99999999999999.9"),
        ]));
        let out = view(env.config()).unwrap();
        assert!(out
            .message()
            .ends_with("Total spent: ₹199999999999999.80"));
    }

    #[test]
    fn test_view_does_not_write() {
        let env = TestEnv::with_sample();
        let before = std::fs::read_to_string(env.config().store().path()).unwrap();
        view(env.config()).unwrap();
        let after = std::fs::read_to_string(env.config().store().path()).unwrap();
        assert_eq!(before, after);
    }
}
