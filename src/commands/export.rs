//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::fs;
use crate::model::{CsvRecord, Expenses};
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Writes every expense, in the order they were added, to a CSV file with the header
/// `id,date,title,category,amount,note`.
///
/// The file is written to `args.output` when given, otherwise to the configured export path. When
/// there are no expenses, no file is written.
///
/// # Errors
///
/// - `ErrorType::Export` if the file cannot be written.
pub fn export(config: &Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let expenses = config.store().load();
    if expenses.is_empty() {
        return Ok("No data to export.".into());
    }

    let path = args
        .output
        .unwrap_or_else(|| config.export_path().to_path_buf());
    write_csv(&expenses, &path).pub_result(ErrorType::Export)?;

    Ok(Out::new(format!("Exported to {}", path.display()), path))
}

/// Renders the whole CSV in memory and then replaces `path`, so a failed export never leaves a
/// truncated file behind.
fn write_csv(expenses: &Expenses, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for expense in expenses.iter() {
        writer
            .serialize(CsvRecord::from(expense))
            .with_context(|| format!("Unable to write expense {} to CSV", expense.id()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish the CSV: {}", e.error()))?;
    fs::write_atomic(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{expense, Amount, Expense, EXPORT_HEADERS};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn test_export_empty_writes_nothing() {
        let env = TestEnv::new();
        let out = export(env.config(), ExportArgs::default()).unwrap();
        assert_eq!(out.message(), "No data to export.");
        assert!(!env.config().export_path().exists());
    }

    #[test]
    fn test_export_default_path() {
        let env = TestEnv::with_sample();
        let out = export(env.config(), ExportArgs::default()).unwrap();
        let path = out.structure().unwrap();
        assert_eq!(path, env.config().export_path());

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], EXPORT_HEADERS.join(","));
        assert_eq!(lines[1], "1,2024-01-05,item 1,Food,10,");
        assert_eq!(lines[3], "3,2024-02-01,item 3,Transport,5,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_failure_keeps_previous_file() {
        let env = TestEnv::with_sample();
        let output = env.root().join("out.csv");
        std::fs::write(&output, "previous export").unwrap();
        // A directory where the temporary file would go makes the write fail.
        std::fs::create_dir(env.root().join("out.csv.tmp")).unwrap();

        let e = export(env.config(), ExportArgs::new(Some(output.clone()))).unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Export);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous export");
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let env = TestEnv::with_sample();
        std::fs::write(env.config().export_path(), "previous export").unwrap();
        export(env.config(), ExportArgs::default()).unwrap();
        let content = std::fs::read_to_string(env.config().export_path()).unwrap();
        assert!(content.starts_with("id,date,title,category,amount,note"));
        assert!(!content.contains("previous export"));
    }

    #[test]
    fn test_export_quotes_delimiters() {
        let env = TestEnv::new();
        env.save(Expenses::new(vec![
            Expense::new(
                9,
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                "Dinner, drinks",
                "Food",
                Amount::from_str("42.75").unwrap(),
                "said \"thanks\"",
            ),
            expense(10, "2024-04-02", "Food", "1"),
        ]));
        let output = env.root().join("out").join("custom.csv");
        export(env.config(), ExportArgs::new(Some(output.clone()))).unwrap();

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, EXPORT_HEADERS);
        let rows: Vec<CsvRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Dinner, drinks");
        assert_eq!(rows[0].note, "said \"thanks\"");
        assert_eq!(rows[0].amount, "42.75");
        assert_eq!(rows[1].id, 10);
    }
}
