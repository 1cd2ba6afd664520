//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and SQL functions required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have `contains_ci` registered.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use crate::config::StoreConfig;
use log::{error, info};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::time::{Duration, Instant};

/// Opens the configured SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the database file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - [`DbError::Open`] when the file cannot be opened.
/// - [`DbError::UnsupportedSchemaVersion`] for databases written by a newer binary.
pub fn open_db(config: &StoreConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let mut conn = match Connection::open(&config.path) {
        Ok(conn) => conn,
        Err(source) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            return Err(DbError::Open {
                path: config.path.clone(),
                source,
            });
        }
    };

    match bootstrap_connection(&mut conn, config.busy_timeout()) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn, StoreConfig::default().busy_timeout())?;
    info!(
        "event=db_open module=db status=ok mode=memory duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    register_functions(conn)?;
    apply_migrations(conn)?;
    Ok(())
}

/// `contains_ci(haystack, needle)`: Unicode-aware, case-insensitive literal
/// substring test. NULL on either side never matches.
fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        "contains_ci",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack = ctx.get::<Option<String>>(0)?;
            let needle = ctx.get::<Option<String>>(1)?;
            Ok(match (haystack, needle) {
                (Some(haystack), Some(needle)) => contains_ignore_case(&haystack, &needle),
                _ => false,
            })
        },
    )?;
    Ok(())
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
