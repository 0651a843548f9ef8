//! Search command handler.

use crate::args::SearchArgs;
use crate::commands::Out;
use crate::model::Expense;
use crate::{Config, Result};

/// Finds expenses whose title or category contains the query, ignoring case, or whose date
/// contains it. Matches are listed in the order they were added.
pub fn search(config: &Config, args: SearchArgs) -> Result<Out<Vec<Expense>>> {
    let expenses = config.store().load();
    let matches: Vec<Expense> = expenses.search(&args.query).into_iter().cloned().collect();
    if matches.is_empty() {
        return Ok("No match.".into());
    }

    let symbol = config.currency_symbol();
    let message = matches
        .iter()
        .map(|e| {
            format!(
                "{} | {} | {} | {symbol}{:.2}",
                e.date(),
                e.category(),
                e.title(),
                e.amount()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    fn ids(out: &Out<Vec<Expense>>) -> Vec<i64> {
        out.structure()
            .map(|v| v.iter().map(Expense::id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_search_case_insensitive() {
        let env = TestEnv::with_sample();
        let out = search(env.config(), SearchArgs::new("fOOd")).unwrap();
        assert_eq!(ids(&out), vec![1, 2]);
        assert_eq!(
            out.message().lines().next().unwrap(),
            "2024-01-05 | Food | item 1 | ₹10.00"
        );
    }

    #[test]
    fn test_search_by_date() {
        let env = TestEnv::with_sample();
        let out = search(env.config(), SearchArgs::new("2024-02")).unwrap();
        assert_eq!(ids(&out), vec![3]);
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let env = TestEnv::with_sample();
        let out = search(env.config(), SearchArgs::new("")).unwrap();
        assert_eq!(ids(&out), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_no_match() {
        let env = TestEnv::with_sample();
        let out = search(env.config(), SearchArgs::new("rent")).unwrap();
        assert_eq!(out.message(), "No match.");
        assert!(out.structure().is_none());
    }
}
