//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "phonebook")]
#[command(about = "Interactive contact book backed by SQLite", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file with [store] and [logging] tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file (overrides store.path)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (default: ./logs)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
