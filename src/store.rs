//! The JSON file that holds the full expense collection.
//!
//! Loading never fails. A missing file is an empty collection, and so is a file that cannot be
//! read or parsed. The latter case is logged as a warning and reported through `LoadStatus` so
//! that the data loss it implies is not silent: the next save will replace the corrupt file (after
//! copying it to the backups directory, when backups are enabled).

use crate::backup::Backup;
use crate::fs;
use crate::model::Expenses;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What `Store::load_with_status` found on disk.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoadStatus {
    /// There is no store file yet.
    Missing,
    /// The store file was parsed.
    Loaded,
    /// The store file exists but could not be read or parsed; an empty collection was used.
    Corrupt,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    path: PathBuf,
    backup: Backup,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>, backup: Backup) -> Self {
        Self {
            path: path.into(),
            backup,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the collection, treating a missing or corrupt file as empty.
    pub fn load(&self) -> Expenses {
        self.load_with_status().0
    }

    /// Loads the collection and reports whether the file was missing, parsed or corrupt.
    pub fn load_with_status(&self) -> (Expenses, LoadStatus) {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store file at {}", self.path.display());
                return (Expenses::default(), LoadStatus::Missing);
            }
            Err(e) => {
                warn!("Unable to read, treating as empty. {}", self.corrupt_message(e));
                return (Expenses::default(), LoadStatus::Corrupt);
            }
        };

        match serde_json::from_str::<Expenses>(&content) {
            Ok(expenses) => {
                debug!(
                    "Loaded {} expenses from {}",
                    expenses.len(),
                    self.path.display()
                );
                (expenses, LoadStatus::Loaded)
            }
            Err(e) => {
                warn!("Corrupt, treating as empty. {}", self.corrupt_message(e));
                (Expenses::default(), LoadStatus::Corrupt)
            }
        }
    }

    /// Describes an unusable store file and where its content goes when it is replaced.
    fn corrupt_message(&self, e: impl std::fmt::Display) -> String {
        let path = self.path.display();
        if self.backup.is_enabled() {
            format!(
                "The store file {path} will be overwritten by the next change, and a copy of it \
                kept in {}. Backups rotate, so recover it before {} more changes: {e}",
                self.backup.backups_dir().display(),
                self.backup.backup_copies(),
            )
        } else {
            format!(
                "The store file {path} will be overwritten by the next change and backups are \
                disabled: {e}"
            )
        }
    }

    /// Replaces the store file with `expenses`. The previous file is backed up first.
    pub fn save(&self, expenses: &Expenses) -> Result<()> {
        let json =
            serde_json::to_string_pretty(expenses).context("Failed to serialize expenses")?;
        self.backup
            .save_copy(&self.path)
            .context("Unable to back up the store before saving")?;
        fs::write_atomic(&self.path, json)
            .with_context(|| format!("Unable to save expenses to {}", self.path.display()))?;
        debug!("Saved {} expenses to {}", expenses.len(), self.path.display());
        Ok(())
    }
}
