//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the six contact operations over canonical `contacts` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Every write runs in a single transaction; a failed call leaves no
//!   partial rows behind.
//! - Listings are ordered by ascending `id`.
//! - User text is always bound as a parameter, never spliced into SQL.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId};
use rusqlite::{params, Connection, Params, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    phone_number
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Input rejected before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Bulk insert sequences were empty or of different lengths.
    BatchShape { names: usize, phones: usize },
    NegativeOffset(i64),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BatchShape { names, phones } => write!(
                f,
                "arrays must match in size and not be empty (names={names}, phones={phones})"
            ),
            Self::NegativeOffset(offset) => {
                write!(f, "offset must not be negative, got {offset}")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is not migrated: missing table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(ContactId),
    /// Phone number replaced on every row carrying the name.
    Updated { rows: usize },
}

/// Repository interface for contact operations.
pub trait ContactRepository {
    /// Updates the phone of the contact named `full_name`, or inserts a new one.
    ///
    /// When several rows already share `full_name` (possible through
    /// [`ContactRepository::bulk_insert`]) all of them are updated; callers
    /// should not rely on that.
    fn upsert(&mut self, full_name: &str, phone_number: &str) -> RepoResult<UpsertOutcome>;
    /// Case-insensitive literal substring match on name or phone.
    fn search(&self, fragment: &str) -> RepoResult<Vec<Contact>>;
    /// Returns at most `limit` contacts after skipping `offset`, by ascending id.
    fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Contact>>;
    /// Removes every contact whose name or phone equals `token` exactly.
    fn delete_by_match(&self, token: &str) -> RepoResult<usize>;
    /// Inserts one contact per `(name, phone)` pair, in order, without
    /// consulting existing rows.
    fn bulk_insert(&mut self, names: &[String], phones: &[String])
        -> RepoResult<Vec<ContactId>>;
    /// Returns every contact by ascending id.
    fn list_all(&self) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact repository bound to one unit of work.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_contact_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn upsert(&mut self, full_name: &str, phone_number: &str) -> RepoResult<UpsertOutcome> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let updated = tx.execute(
            "UPDATE contacts SET phone_number = ?2 WHERE full_name = ?1;",
            params![full_name, phone_number],
        )?;

        let outcome = if updated > 0 {
            UpsertOutcome::Updated { rows: updated }
        } else {
            tx.execute(
                "INSERT INTO contacts (full_name, phone_number) VALUES (?1, ?2);",
                params![full_name, phone_number],
            )?;
            UpsertOutcome::Inserted(ContactId(tx.last_insert_rowid()))
        };

        tx.commit()?;
        Ok(outcome)
    }

    fn search(&self, fragment: &str) -> RepoResult<Vec<Contact>> {
        query_contacts(
            self.conn,
            &format!(
                "{CONTACT_SELECT_SQL}
                 WHERE contains_ci(full_name, ?1)
                    OR contains_ci(phone_number, ?1)
                 ORDER BY id ASC;"
            ),
            [fragment],
        )
    }

    fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Contact>> {
        if offset < 0 {
            return Err(ContactValidationError::NegativeOffset(offset).into());
        }
        // SQLite reads a negative LIMIT as "no limit".
        if limit <= 0 {
            return Ok(Vec::new());
        }

        query_contacts(
            self.conn,
            &format!("{CONTACT_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"),
            params![limit, offset],
        )
    }

    fn delete_by_match(&self, token: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM contacts WHERE full_name = ?1 OR phone_number = ?1;",
            [token],
        )?;
        Ok(removed)
    }

    fn bulk_insert(
        &mut self,
        names: &[String],
        phones: &[String],
    ) -> RepoResult<Vec<ContactId>> {
        if names.is_empty() || phones.is_empty() || names.len() != phones.len() {
            return Err(ContactValidationError::BatchShape {
                names: names.len(),
                phones: phones.len(),
            }
            .into());
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(names.len());
        {
            let mut stmt =
                tx.prepare("INSERT INTO contacts (full_name, phone_number) VALUES (?1, ?2);")?;
            for (name, phone) in names.iter().zip(phones) {
                stmt.execute(params![name, phone])?;
                ids.push(ContactId(tx.last_insert_rowid()));
            }
        }
        tx.commit()?;

        Ok(ids)
    }

    fn list_all(&self) -> RepoResult<Vec<Contact>> {
        query_contacts(
            self.conn,
            &format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"),
            [],
        )
    }
}

fn query_contacts<P: Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<Contact>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, parse_contact_row)?;
    let mut contacts = Vec::new();
    for row in rows {
        contacts.push(row?);
    }
    Ok(contacts)
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: ContactId(row.get("id")?),
        full_name: row.get("full_name")?,
        phone_number: row.get("phone_number")?,
    })
}

fn ensure_contact_connection_ready(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'contacts'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::MissingRequiredTable("contacts"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ContactRepository, ContactValidationError, RepoError, SqliteContactRepository};
    use crate::db::open_db_in_memory;
    use rusqlite::Connection;

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let mut conn = Connection::open_in_memory().unwrap();
        let err = SqliteContactRepository::try_new(&mut conn)
            .err()
            .expect("bare connection must be rejected");
        assert!(matches!(err, RepoError::MissingRequiredTable("contacts")));
    }

    #[test]
    fn negative_offset_is_a_validation_error() {
        let mut conn = open_db_in_memory().unwrap();
        let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
        let err = repo.list_page(5, -1).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ContactValidationError::NegativeOffset(-1))
        ));
    }

    #[test]
    fn negative_limit_does_not_mean_unbounded() {
        let mut conn = open_db_in_memory().unwrap();
        let mut repo = SqliteContactRepository::try_new(&mut conn).unwrap();
        repo.upsert("Ann", "1").unwrap();
        assert!(repo.list_page(-1, 0).unwrap().is_empty());
        assert!(repo.list_page(0, 0).unwrap().is_empty());
    }

    #[test]
    fn batch_shape_message_matches_contract() {
        let err = ContactValidationError::BatchShape {
            names: 1,
            phones: 2,
        };
        assert!(err
            .to_string()
            .starts_with("arrays must match in size and not be empty"));
    }
}
