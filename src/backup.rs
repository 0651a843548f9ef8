//! Rotating copies of the expense store, taken before it is overwritten.

use crate::fs;
use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for expense store backup files.
pub const EXPENSES: &str = "expenses";

/// Manages backup file creation and rotation.
///
/// Filenames have the form `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a per-day sequence
/// number, so sorting by filename sorts oldest first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    pub fn new(backups_dir: impl Into<PathBuf>, backup_copies: u32) -> Self {
        Self {
            backups_dir: backups_dir.into(),
            backup_copies,
        }
    }

    /// A `Backup` that never writes anything.
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), 0)
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// The number of copies kept before the oldest is deleted.
    pub fn backup_copies(&self) -> u32 {
        self.backup_copies
    }

    pub fn is_enabled(&self) -> bool {
        self.backup_copies > 0
    }

    /// Copies `source` into the backups directory and rotates old copies.
    ///
    /// Returns `None` without touching the disk when backups are disabled or `source` does not
    /// exist yet.
    pub fn save_copy(&self, source: &Path) -> Result<Option<PathBuf>> {
        if !self.is_enabled() || !source.is_file() {
            return Ok(None);
        }
        fs::create_dir_all(&self.backups_dir)?;

        let date = today();
        let seq = self.next_sequence_number(EXPENSES, &date)?;
        let path = self
            .backups_dir
            .join(format!("{EXPENSES}.{date}-{seq:03}.json"));
        fs::copy(source, &path)?;
        debug!("Saved backup to {}", path.display());

        self.rotate(EXPENSES)?;
        Ok(Some(path))
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let max_seq = fs::file_names(&self.backups_dir)?
            .iter()
            .filter_map(|name| parse_sequence_number(name, prefix, date))
            .max()
            .unwrap_or(0);
        Ok(max_seq + 1)
    }

    /// Deletes the oldest backup files so that at most `backup_copies` remain.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<String> = fs::file_names(&self.backups_dir)?
            .into_iter()
            .filter(|name| is_backup_file(name, prefix))
            .collect();
        files.sort();

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for name in files.into_iter().take(to_delete) {
            fs::remove(self.backups_dir.join(name))?;
        }
        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}
