use crate::model::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The per-category breakdown of one calendar month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlySummary {
    year: i32,
    month: u32,
    total: Amount,
    /// In the order each category was first seen in the collection.
    categories: Vec<CategoryTotal>,
}

impl MonthlySummary {
    pub(crate) fn new(
        year: i32,
        month: u32,
        total: Amount,
        categories: Vec<CategoryTotal>,
    ) -> Self {
        Self {
            year,
            month,
            total,
            categories,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn categories(&self) -> &[CategoryTotal] {
        &self.categories
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryTotal {
    category: String,
    subtotal: Amount,
    /// Share of the month's total, rounded to one decimal place.
    percent: Decimal,
}

impl CategoryTotal {
    pub(crate) fn new(category: String, subtotal: Amount, total: Amount) -> Self {
        Self {
            category,
            subtotal,
            percent: percent_of(subtotal, total),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }
}

/// `part / total * 100` rounded to one decimal place. A zero total yields zero for every part.
fn percent_of(part: Amount, total: Amount) -> Decimal {
    let mut percent = part
        .value()
        .checked_div(total.value())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.round_dp(1))
        .unwrap_or(Decimal::ZERO);
    percent.rescale(1);
    percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(amount("1"), amount("3")).to_string(), "33.3");
        assert_eq!(percent_of(amount("2"), amount("3")).to_string(), "66.7");
        assert_eq!(percent_of(amount("30"), amount("30")).to_string(), "100.0");
    }

    #[test]
    fn test_percent_of_zero_total() {
        assert_eq!(percent_of(amount("0"), amount("0")).to_string(), "0.0");
        assert_eq!(percent_of(amount("5"), amount("0")).to_string(), "0.0");
    }
}
