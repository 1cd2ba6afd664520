//! Core domain logic for the phonebook.
//! This crate is the single source of truth for contact storage invariants.

pub mod config;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{load_toml, ConfigError, StoreConfig};
pub use import::{read_contact_file, read_contacts, ContactBatch, ImportError};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::contact::{Contact, ContactId};
pub use repo::contact_repo::{
    ContactRepository, ContactValidationError, RepoError, RepoResult, SqliteContactRepository,
    UpsertOutcome,
};
pub use service::contact_service::ContactService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
