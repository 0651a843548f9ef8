pub mod args;
mod backup;
pub mod commands;
mod config;
mod error;
mod fs;
pub mod model;
mod store;


pub use backup::Backup;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use store::{LoadStatus, Store};
