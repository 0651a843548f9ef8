use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Error, ErrorType, Result};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.currency())?.print(),

        Command::Add(add_args) => commands::add(&load(home)?, add_args.clone())?.print(),

        Command::View => commands::view(&load(home)?)?.print(),

        Command::Summary(summary_args) => {
            commands::summary(&load(home)?, summary_args.clone())?.print()
        }

        Command::Search(search_args) => {
            commands::search(&load(home)?, search_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            commands::delete(&load(home)?, delete_args.clone())?.print()
        }

        Command::Export(export_args) => {
            commands::export(&load(home)?, export_args.clone())?.print()
        }

        Command::Menu => {
            let config = load(home)?;
            commands::menu(&config, io::stdin().lock(), io::stdout())?.print()
        }
    };
    Ok(())
}

fn load(home: &Path) -> Result<Config> {
    Config::load(home).map_err(|e| Error::new(ErrorType::Config, e))
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                "expense_tracker",
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
