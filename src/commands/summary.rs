//! Monthly summary command handler.

use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::error::{Error, ErrorType};
use crate::model::MonthlySummary;
use crate::{Config, Result};
use chrono::{Datelike, Local};

/// Totals one calendar month, overall and per category.
///
/// A blank year or month means the current one. Categories are listed in the order they first
/// appear in the collection, each with its share of the month's total. When the month's total is
/// zero every share is reported as 0.0%.
///
/// # Errors
///
/// - `ErrorType::InvalidMonth` if the year is not an integer or the month is not 1-12.
pub fn summary(config: &Config, args: SummaryArgs) -> Result<Out<MonthlySummary>> {
    let today = Local::now().date_naive();
    let year = match blank_to_none(args.year.as_deref()) {
        None => today.year(),
        Some(y) => y
            .parse::<i32>()
            .map_err(|_| Error::msg(ErrorType::InvalidMonth, format!("Invalid year '{y}'")))?,
    };
    let month = match blank_to_none(args.month.as_deref()) {
        None => today.month(),
        Some(m) => m
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| {
                Error::msg(
                    ErrorType::InvalidMonth,
                    format!("Invalid month '{m}', expected 1-12"),
                )
            })?,
    };

    let expenses = config.store().load();
    let summary = match expenses.monthly_summary(year, month) {
        None => return Ok("No records.".into()),
        Some(summary) => summary,
    };

    let symbol = config.currency_symbol();
    let mut lines = vec![format!("Summary for {year}-{month:02}")];
    for c in summary.categories() {
        lines.push(format!(
            "{}: {symbol}{:.2} ({}%)",
            c.category(),
            c.subtotal(),
            c.percent()
        ));
    }
    lines.push(format!("Total: {symbol}{:.2}", summary.total()));

    Ok(Out::new(lines.join("\n"), summary))
}

fn blank_to_none(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{expense, Amount, Expenses};
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn args(year: &str, month: &str) -> SummaryArgs {
        SummaryArgs::new(Some(year.to_string()), Some(month.to_string()))
    }

    #[test]
    fn test_summary_worked_example() {
        let env = TestEnv::with_sample();
        let out = summary(env.config(), args("2024", "1")).unwrap();
        assert_eq!(
            out.message(),
            "Summary for 2024-01\nFood: ₹30.00 (100.0%)\nTotal: ₹30.00"
        );
        let s = out.structure().unwrap();
        assert_eq!(s.total(), Amount::from_str("30.0").unwrap());
    }

    #[test]
    fn test_summary_no_records() {
        let env = TestEnv::with_sample();
        let out = summary(env.config(), args("2023", "12")).unwrap();
        assert_eq!(out.message(), "No records.");
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_summary_zero_total() {
        let env = TestEnv::new();
        env.save(Expenses::new(vec![
            expense(1, "2024-03-01", "Gifts", "0"),
            expense(2, "2024-03-02", "Food", "0"),
        ]));
        let out = summary(env.config(), args("2024", "03")).unwrap();
        assert!(out.message().contains("Gifts: ₹0.00 (0.0%)"));
        assert!(out.message().contains("Food: ₹0.00 (0.0%)"));
    }

    #[test]
    fn test_summary_defaults_to_current_month() {
        let env = TestEnv::new();
        let today = Local::now().date_naive();
        env.save(Expenses::new(vec![expense(1, &today.to_string(), "Food", "7")]));
        let out = summary(env.config(), SummaryArgs::default()).unwrap();
        assert_eq!(out.structure().unwrap().month(), today.month());
        assert_eq!(out.structure().unwrap().year(), today.year());
    }

    #[test]
    fn test_summary_invalid_input() {
        let env = TestEnv::with_sample();
        for (y, m) in [("2024", "13"), ("2024", "0"), ("2024", "jan"), ("year", "1")] {
            let e = summary(env.config(), args(y, m)).unwrap_err();
            assert_eq!(e.error_type(), ErrorType::InvalidMonth);
        }
    }
}
