use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, its backups subdirectory and a default `config.json`.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/expenses`
/// - `currency` - The currency symbol to write into the config instead of the default.
///
/// # Errors
/// - Returns an error if `config.json` already exists or any file operation fails.
pub fn init(home: &Path, currency: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(home, currency)
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!("Created {}", config.config_path().display()).into())
}
