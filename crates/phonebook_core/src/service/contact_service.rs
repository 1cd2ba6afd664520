//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the stable entry points callers use for every contact operation.
//! - Scope one store connection to each call.
//!
//! # Invariants
//! - A connection is opened at the start of every operation and dropped
//!   before the call returns, on success and on failure.
//! - Failures are returned unchanged; nothing is retried.
//! - Log events carry counts and durations only, never names or numbers.

use crate::config::StoreConfig;
use crate::db::migrations::current_user_version;
use crate::db::open_db;
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{
    ContactRepository, RepoResult, SqliteContactRepository, UpsertOutcome,
};
use log::{info, warn};
use std::time::Instant;

/// Use-case service over the SQLite contact store.
#[derive(Debug, Clone)]
pub struct ContactService {
    config: StoreConfig,
}

impl ContactService {
    /// Creates a service bound to `config`. No connection is opened yet.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Creates the schema if needed and returns the version in effect.
    ///
    /// Safe to call on every startup; existing rows are untouched.
    pub fn ensure_schema(&self) -> RepoResult<u32> {
        let started_at = Instant::now();
        let conn = open_db(&self.config)?;
        let version = current_user_version(&conn)?;
        info!(
            "event=ensure_schema module=service status=ok schema_version={} duration_ms={}",
            version,
            started_at.elapsed().as_millis()
        );
        Ok(version)
    }

    /// Sets the phone of the contact named `full_name`, inserting it if absent.
    pub fn upsert(&self, full_name: &str, phone_number: &str) -> RepoResult<UpsertOutcome> {
        self.with_repo("upsert", |repo| repo.upsert(full_name, phone_number))
    }

    pub fn search(&self, fragment: &str) -> RepoResult<Vec<Contact>> {
        self.with_repo("search", |repo| repo.search(fragment))
    }

    pub fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Contact>> {
        self.with_repo("list_page", |repo| repo.list_page(limit, offset))
    }

    /// Returns the number of removed contacts; zero is not an error.
    pub fn delete_by_match(&self, token: &str) -> RepoResult<usize> {
        self.with_repo("delete_by_match", |repo| repo.delete_by_match(token))
    }

    /// Inserts all pairs or none of them.
    pub fn bulk_insert(&self, names: &[String], phones: &[String]) -> RepoResult<Vec<ContactId>> {
        self.with_repo("bulk_insert", |repo| repo.bulk_insert(names, phones))
    }

    pub fn list_all(&self) -> RepoResult<Vec<Contact>> {
        self.with_repo("list_all", |repo| repo.list_all())
    }

    fn with_repo<T: Affected>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&mut SqliteContactRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let mut conn = open_db(&self.config)?;
        let result =
            SqliteContactRepository::try_new(&mut conn).and_then(|mut repo| run(&mut repo));

        match &result {
            Ok(value) => info!(
                "event=contact_op module=service status=ok op={} rows={} duration_ms={}",
                operation,
                value.affected(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=contact_op module=service status=error op={} duration_ms={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Row count reported in `contact_op` log events.
trait Affected {
    fn affected(&self) -> usize;
}

impl<T> Affected for Vec<T> {
    fn affected(&self) -> usize {
        self.len()
    }
}

impl Affected for usize {
    fn affected(&self) -> usize {
        *self
    }
}

impl Affected for UpsertOutcome {
    fn affected(&self) -> usize {
        match self {
            Self::Inserted(_) => 1,
            Self::Updated { rows } => *rows,
        }
    }
}
