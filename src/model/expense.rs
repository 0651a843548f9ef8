use crate::model::summary::{CategoryTotal, MonthlySummary};
use crate::model::Amount;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The category given to an expense when none is supplied.
pub const DEFAULT_CATEGORY: &str = "Other";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A single logged transaction.
///
/// Records are never edited after creation; they can only be removed, see `Expenses::remove_id`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    id: i64,
    /// Serialized as `YYYY-MM-DD`.
    date: NaiveDate,
    #[serde(default)]
    title: String,
    #[serde(default = "default_category")]
    category: String,
    amount: Amount,
    #[serde(default)]
    note: String,
}

impl Expense {
    /// Creates a new expense. A blank `category` becomes `DEFAULT_CATEGORY`.
    pub fn new(
        id: i64,
        date: NaiveDate,
        title: impl Into<String>,
        category: impl Into<String>,
        amount: Amount,
        note: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let category = if category.trim().is_empty() {
            default_category()
        } else {
            category
        };
        Self {
            id,
            date,
            title: title.into(),
            category,
            amount,
            note: note.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Case-insensitive match of `query` against the title and category, plus a plain substring
    /// match against the ISO date text.
    fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self.category.to_lowercase().contains(query)
            || self.date.to_string().contains(query)
    }
}

/// The full collection of expenses, persisted as a single JSON array.
///
/// The order of the inner `Vec` is the order in which records were added (minus deletions) and it
/// is preserved by every operation except `sorted_by_date_desc`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expenses(Vec<Expense>);

impl Expenses {
    pub fn new(data: Vec<Expense>) -> Self {
        Self(data)
    }

    pub fn data(&self) -> &Vec<Expense> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.0.iter()
    }

    pub fn push(&mut self, expense: Expense) {
        self.0.push(expense)
    }

    /// Returns an id derived from `now_millis` that is not used by any record in the collection.
    ///
    /// Ids are creation timestamps in milliseconds. When two records are created within the same
    /// millisecond (or the clock goes backwards) the id is bumped past the largest existing id.
    pub fn next_id(&self, now_millis: i64) -> i64 {
        match self.0.iter().map(Expense::id).max() {
            Some(max) if max >= now_millis => max.saturating_add(1),
            _ => now_millis,
        }
    }

    /// Sum of every amount in the collection.
    pub fn total(&self) -> Amount {
        self.0.iter().map(Expense::amount).sum()
    }

    /// Returns the records sorted newest first. Records on the same date keep their relative
    /// order.
    pub fn sorted_by_date_desc(&self) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = self.0.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Returns the records whose date falls in the given year and month, in collection order.
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&Expense> {
        self.0
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect()
    }

    /// Totals the given month by category. Returns `None` when no record falls in the month.
    pub fn monthly_summary(&self, year: i32, month: u32) -> Option<MonthlySummary> {
        let records = self.in_month(year, month);
        if records.is_empty() {
            return None;
        }

        // Categories in first-seen order.
        let mut subtotals: Vec<(String, Amount)> = Vec::new();
        for record in &records {
            match subtotals.iter_mut().find(|(c, _)| c == &record.category) {
                Some((_, subtotal)) => *subtotal = *subtotal + record.amount,
                None => subtotals.push((record.category.clone(), record.amount)),
            }
        }

        let total: Amount = records.iter().map(|e| e.amount).sum();
        let categories = subtotals
            .into_iter()
            .map(|(category, subtotal)| CategoryTotal::new(category, subtotal, total))
            .collect();

        Some(MonthlySummary::new(year, month, total, categories))
    }

    /// Returns every record matching `query` in collection order. The query is trimmed and
    /// lower-cased; an empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        let query = query.trim().to_lowercase();
        self.0.iter().filter(|e| e.matches(&query)).collect()
    }

    /// Removes every record with the given `id` and returns how many were removed.
    pub fn remove_id(&mut self, id: i64) -> usize {
        let before = self.0.len();
        self.0.retain(|e| e.id != id);
        before - self.0.len()
    }
}

impl IntoIterator for Expenses {
    type Item = Expense;
    type IntoIter = std::vec::IntoIter<Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Expense> for Expenses {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;

    pub(crate) fn expense(id: i64, date: &str, category: &str, amount: &str) -> Expense {
        Expense::new(
            id,
            NaiveDate::from_str(date).unwrap(),
            format!("item {id}"),
            category,
            Amount::from_str(amount).unwrap(),
            "",
        )
    }

    /// The three records used throughout the worked examples.
    pub(crate) fn sample() -> Expenses {
        Expenses::new(vec![
            expense(1, "2024-01-05", "Food", "10.0"),
            expense(2, "2024-01-20", "Food", "20.0"),
            expense(3, "2024-02-01", "Transport", "5.0"),
        ])
    }

    fn ids(records: &[&Expense]) -> Vec<i64> {
        records.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_blank_category_defaults_to_other() {
        let e = expense(1, "2024-01-05", "  ", "1");
        assert_eq!(e.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_sorted_by_date_desc() {
        let expenses = sample();
        assert_eq!(ids(&expenses.sorted_by_date_desc()), vec![3, 2, 1]);
        assert_eq!(expenses.total(), Amount::from_str("35").unwrap());
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let expenses = Expenses::new(vec![
            expense(1, "2024-03-01", "A", "1"),
            expense(2, "2024-03-02", "A", "1"),
            expense(3, "2024-03-01", "A", "1"),
            expense(4, "2024-03-02", "A", "1"),
        ]);
        assert_eq!(ids(&expenses.sorted_by_date_desc()), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_monthly_summary_worked_example() {
        let summary = sample().monthly_summary(2024, 1).unwrap();
        assert_eq!(summary.total(), Amount::from_str("30").unwrap());
        assert_eq!(summary.categories().len(), 1);
        let food = &summary.categories()[0];
        assert_eq!(food.category(), "Food");
        assert_eq!(food.subtotal(), Amount::from_str("30").unwrap());
        assert_eq!(food.percent().to_string(), "100.0");
    }

    #[test]
    fn test_monthly_summary_empty_month() {
        assert!(sample().monthly_summary(2023, 1).is_none());
        assert!(Expenses::default().monthly_summary(2024, 1).is_none());
    }

    #[test]
    fn test_monthly_summary_first_seen_order_and_percentages() {
        let expenses = Expenses::new(vec![
            expense(1, "2024-05-01", "Rent", "50"),
            expense(2, "2024-05-02", "Food", "20"),
            expense(3, "2024-05-03", "Rent", "10"),
            expense(4, "2024-05-04", "Fun", "20"),
            expense(5, "2024-06-01", "Food", "999"),
        ]);
        let summary = expenses.monthly_summary(2024, 5).unwrap();
        let cats: Vec<&str> = summary.categories().iter().map(|c| c.category()).collect();
        assert_eq!(cats, vec!["Rent", "Food", "Fun"]);
        let pcts: Vec<String> = summary
            .categories()
            .iter()
            .map(|c| c.percent().to_string())
            .collect();
        assert_eq!(pcts, vec!["60.0", "20.0", "20.0"]);
    }

    #[test]
    fn test_monthly_summary_percentages_sum_to_about_100() {
        let expenses = Expenses::new(vec![
            expense(1, "2024-07-01", "A", "1"),
            expense(2, "2024-07-02", "B", "1"),
            expense(3, "2024-07-03", "C", "1"),
        ]);
        let summary = expenses.monthly_summary(2024, 7).unwrap();
        let sum: rust_decimal::Decimal = summary.categories().iter().map(|c| c.percent()).sum();
        let diff = (sum - rust_decimal::Decimal::from(100)).abs();
        assert!(diff <= rust_decimal::Decimal::from_str("0.2").unwrap());
    }

    #[test]
    fn test_monthly_summary_zero_total_is_zero_percent() {
        let expenses = Expenses::new(vec![
            expense(1, "2024-08-01", "A", "0"),
            expense(2, "2024-08-02", "B", "0"),
        ]);
        let summary = expenses.monthly_summary(2024, 8).unwrap();
        assert!(summary.total().is_zero());
        for c in summary.categories() {
            assert!(c.percent().is_zero());
        }
    }

    #[test]
    fn test_search() {
        let mut expenses = sample();
        expenses.push(Expense::new(
            4,
            NaiveDate::from_str("2024-03-03").unwrap(),
            "Coffee Beans",
            "Groceries",
            Amount::from_str("9").unwrap(),
            "",
        ));
        assert_eq!(ids(&expenses.search("COFFEE")), vec![4]);
        assert_eq!(ids(&expenses.search("food")), vec![1, 2]);
        assert_eq!(ids(&expenses.search("2024-01")), vec![1, 2]);
        assert_eq!(ids(&expenses.search("")), vec![1, 2, 3, 4]);
        assert!(expenses.search("nothing like this").is_empty());
    }

    #[test]
    fn test_remove_id() {
        let mut expenses = sample();
        assert_eq!(expenses.remove_id(2), 1);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses.remove_id(2), 0);
        assert_eq!(expenses.len(), 2);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(Expenses::default().next_id(1_000), 1_000);
        let expenses = sample();
        assert_eq!(expenses.next_id(1_000), 1_000);
        assert_eq!(expenses.next_id(2), 4);
        assert_eq!(expenses.next_id(3), 4);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["date"], "2024-01-05");
        assert_eq!(first["title"], "item 1");
        assert_eq!(first["category"], "Food");
        assert_eq!(first["amount"], 10);
        assert_eq!(first["note"], "");
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"[{"id": 7, "date": "2024-01-05", "title": "Tea", "amount": 2.5}]"#;
        let expenses: Expenses = serde_json::from_str(json).unwrap();
        let e = &expenses.data()[0];
        assert_eq!(e.category(), DEFAULT_CATEGORY);
        assert_eq!(e.note(), "");
        assert_eq!(e.amount(), Amount::from_str("2.5").unwrap());
    }
}
