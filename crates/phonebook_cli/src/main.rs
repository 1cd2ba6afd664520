//! Phonebook command-line entry point.
//!
//! # Responsibility
//! - Resolve settings, start logging, prepare the store, then hand stdin and
//!   stdout to the interactive menu.

mod cli;
mod menu;
mod settings;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use log::info;
use phonebook_core::{flush_logging, init_logging, ContactService};
use settings::Settings;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let settings = Settings::resolve(cli, &cwd)?;

    init_logging(&settings.log_level, &settings.log_dir).context("failed to start logging")?;

    let service = ContactService::new(settings.store);
    service
        .ensure_schema()
        .context("failed to prepare contact store")?;

    let outcome = menu::run_menu(&service, io::stdin().lock(), io::stdout().lock());
    info!("event=app_exit module=cli status={}", if outcome.is_ok() { "ok" } else { "error" });
    flush_logging();
    outcome.context("menu input/output failed")
}
