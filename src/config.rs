//! Configuration file handling.
//!
//! The configuration file is optional. It is stored at `$EXPENSES_HOME/config.json` and holds
//! settings such as the currency symbol used in reports, the names of the store and export files,
//! and the number of backup copies to keep. When it is absent, defaults are used.

use crate::backup::Backup;
use crate::fs;
use crate::store::Store;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const CURRENCY_SYMBOL: &str = "₹";
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const EXPENSES_JSON: &str = "expenses.json";
const EXPORT_CSV: &str = "expenses_export.csv";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`, if present.
/// It provides the `Store` and the paths of the files the commands read and write.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: Store,
    export_path: PathBuf,
}

impl Config {
    /// Creates the home directory and its backups subdirectory, and writes an initial
    /// `config.json` with default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/expenses`
    /// - `currency_symbol` - Overrides the default currency symbol shown in reports.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or any file operation fails.
    pub fn create(dir: impl Into<PathBuf>, currency_symbol: Option<&str>) -> Result<Self> {
        let root = make_root(dir.into())?;
        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("The config file already exists '{}'", config_path.display())
        }

        let mut config_file = ConfigFile::default();
        if let Some(symbol) = currency_symbol {
            config_file.currency_symbol = symbol.to_string();
        }
        config_file.save(&config_path)?;
        fs::create_dir_all(root.join(BACKUPS))?;

        Ok(Self::new(root, config_path, config_file))
    }

    /// This will
    /// - create `home` if it does not exist
    /// - load the config file if it exists, or use default settings if it does not
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let root = make_root(home.into())?;
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        Ok(Self::new(root, config_path, config_file))
    }

    fn new(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let backups = root.join(BACKUPS);
        let store_path = resolve(&root, config_file.store_file());
        let export_path = resolve(&root, config_file.export_file());
        let store = Store::new(
            store_path,
            Backup::new(&backups, config_file.backup_copies),
        );
        Self {
            root,
            backups,
            config_path,
            config_file,
            store,
            export_path,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }
}

fn make_root(maybe_relative: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&maybe_relative).context("Unable to create the expenses home directory")?;
    std::fs::canonicalize(&maybe_relative).with_context(|| {
        format!(
            "Unable to canonicalize the path {}",
            maybe_relative.to_string_lossy()
        )
    })
}

/// Returns `p` if it is absolute, otherwise joins it to `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "currency_symbol": "₹",
///   "backup_copies": 5,
///   "store_file": "expenses.json",
///   "export_file": "exports/expenses_export.csv"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Shown before every amount in reports
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,

    /// Number of backup copies of the store to keep, zero disables backups
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// Path to the store file (relative to the home directory or absolute)
    /// Defaults to $EXPENSES_HOME/expenses.json if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    store_file: Option<PathBuf>,

    /// Path to the CSV export file (relative to the home directory or absolute)
    /// Defaults to $EXPENSES_HOME/expenses_export.csv if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    export_file: Option<PathBuf>,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: default_currency_symbol(),
            backup_copies: BACKUP_COPIES,
            store_file: None,
            export_file: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another application.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write_atomic(path, data).context("Unable to write config file")
    }

    fn store_file(&self) -> PathBuf {
        self.store_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPENSES_JSON))
    }

    fn export_file(&self) -> PathBuf {
        self.export_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPORT_CSV))
    }
}
