//! These structs provide the CLI interface for the expenses CLI.
//!
//! Field values are kept as the raw text the user typed. Validation (dates, amounts, ids, months)
//! happens in the command handlers so that the command line and the interactive menu reject bad
//! input in exactly the same way.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for keeping track of personal expenses.
///
/// Expenses are stored in a JSON file in your expenses home directory. You can add, list,
/// summarize by month, search, delete and export them to CSV. Run `expenses menu` for an
/// interactive, menu driven session.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and write a default config.json.
    ///
    /// This is optional: every other command works with default settings when there is no
    /// config.json. Run it when you want a config file to edit, e.g. to change the currency
    /// symbol or the number of backups kept.
    Init(InitArgs),
    /// Record a new expense.
    Add(AddArgs),
    /// List all expenses, newest first, with the total spent.
    View,
    /// Show the per-category breakdown of one month.
    Summary(SummaryArgs),
    /// Find expenses whose title, category or date contains some text.
    Search(SearchArgs),
    /// Delete an expense by its ID.
    Delete(DeleteArgs),
    /// Write all expenses to a CSV file.
    Export(ExportArgs),
    /// Start an interactive, menu driven session.
    Menu,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expenses and configuration are held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `expenses init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The currency symbol shown before amounts in reports.
    #[arg(long)]
    currency: Option<String>,
}

impl InitArgs {
    pub fn new(currency: Option<String>) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct AddArgs {
    /// The date of the expense as YYYY-MM-DD, DD-MM-YYYY or YYYY/MM/DD. Defaults to today.
    #[arg(long)]
    pub(crate) date: Option<String>,

    /// What the money was spent on.
    #[arg(long, default_value = "")]
    pub(crate) title: String,

    /// The category of the expense. Defaults to "Other".
    #[arg(long)]
    pub(crate) category: Option<String>,

    /// The amount spent, e.g. 12.50. A leading currency sign and thousands commas are accepted.
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) amount: String,

    /// An optional note.
    #[arg(long)]
    pub(crate) note: Option<String>,
}

impl AddArgs {
    pub fn new<S1, S2, S3>(
        date: Option<String>,
        title: S1,
        category: Option<String>,
        amount: S2,
        note: Option<S3>,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            date,
            title: title.into(),
            category,
            amount: amount.into(),
            note: note.map(Into::into),
        }
    }
}

/// Args for the `expenses summary` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SummaryArgs {
    /// The year, e.g. 2024. Defaults to the current year.
    #[arg(long)]
    pub(crate) year: Option<String>,

    /// The month, 1-12. Defaults to the current month.
    #[arg(long)]
    pub(crate) month: Option<String>,
}

impl SummaryArgs {
    pub fn new(year: Option<String>, month: Option<String>) -> Self {
        Self { year, month }
    }
}

/// Args for the `expenses search` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SearchArgs {
    /// The text to look for. Matching is case-insensitive. An empty query matches everything.
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub(crate) query: String,
}

impl SearchArgs {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the expense to delete, as found in the CSV written by `expenses export`.
    #[arg(allow_hyphen_values = true)]
    pub(crate) id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Args for the `expenses export` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// Where to write the CSV file. Defaults to the export file in the expenses home directory.
    #[arg(long, short = 'o')]
    pub(crate) output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or EXPENSES_HOME instead of relying on the default \
                expenses home directory.",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
