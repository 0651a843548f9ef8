use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// The date formats accepted from user input, tried in this order.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

/// The error returned when date text matches none of the `DATE_FORMATS`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DateError(String);

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid date format '{}'. Use YYYY-MM-DD, DD-MM-YYYY or YYYY/MM/DD",
            self.0
        )
    }
}

impl std::error::Error for DateError {}

/// Parses user supplied date text. The first format in `DATE_FORMATS` that matches wins.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| DateError(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date("2024-01-05").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_day_first() {
        assert_eq!(parse_date("05-01-2024").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_slashes() {
        assert_eq!(parse_date(" 2024/12/31 ").unwrap(), ymd(2024, 12, 31));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for bad in ["13/45/9999", "2024-02-30", "yesterday", "", "2024.01.05"] {
            let e = parse_date(bad).unwrap_err();
            assert!(e.to_string().contains("Invalid date format"));
        }
    }
}
