//! Startup settings: config file merged with command-line overrides.

use crate::cli::Cli;
use phonebook_core::{default_log_level, load_toml, ConfigError, StoreConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    store: StoreConfig,
    logging: FileLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileLogging {
    level: Option<String>,
    dir: Option<PathBuf>,
}

/// Fully resolved settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store: StoreConfig,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
}

impl Settings {
    /// Resolves settings from `cli`, reading `cli.config` when given.
    pub fn resolve(cli: &Cli, cwd: &Path) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => load_toml::<FileConfig>(path)?,
            None => FileConfig::default(),
        };

        let mut store = file.store;
        if let Some(db) = &cli.db {
            store.path = db.clone();
        }

        let log_level = cli
            .log_level
            .clone()
            .or(file.logging.level)
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = cli
            .log_dir
            .clone()
            .or(file.logging.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self {
            store,
            log_level,
            log_dir: cwd.join(log_dir),
        })
    }
}
