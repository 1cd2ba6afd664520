//! Bulk-import file reader.
//!
//! # Responsibility
//! - Turn a comma-delimited contact file into parallel name/phone columns
//!   ready for `bulk_insert`.
//!
//! # Invariants
//! - Field 1 is the name and field 2 the phone; further fields are ignored.
//! - Records with fewer than two fields are skipped, not reported as errors.
//! - No header row is assumed; the first record is data.
//! - The reader never touches the store.

use csv::ReaderBuilder;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read import file `{}`: {source}", path.display())
            }
            Self::Csv(err) => write!(f, "malformed import file: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Contacts read from one import file, column-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBatch {
    pub names: Vec<String>,
    pub phones: Vec<String>,
    /// Records dropped for having fewer than two fields.
    pub skipped: usize,
}

impl ContactBatch {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Reads the contact file at `path`.
pub fn read_contact_file(path: impl AsRef<Path>) -> ImportResult<ContactBatch> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_contacts(file)
}

/// Reads contact records from any byte source.
pub fn read_contacts(source: impl Read) -> ImportResult<ContactBatch> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut batch = ContactBatch::default();
    for record in reader.records() {
        let record = record?;
        match (record.get(0), record.get(1)) {
            (Some(name), Some(phone)) => {
                batch.names.push(name.to_string());
                batch.phones.push(phone.to_string());
            }
            _ => batch.skipped += 1,
        }
    }

    Ok(batch)
}
