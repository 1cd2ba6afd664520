//! Contact domain model.
//!
//! # Responsibility
//! - Define the single persisted entity: a name/phone pair with a stable id.
//!
//! # Invariants
//! - `id` is assigned by the store, increases monotonically and is never
//!   reused for another contact.
//! - `full_name` and `id` are immutable once stored; only `phone_number`
//!   changes over a contact's lifetime.
//! - `phone_number` is free-form text and is never validated.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned identifier, also the ordering key for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl ContactId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted phonebook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    /// De-facto natural key for upserts, not unique at the storage layer.
    pub full_name: String,
    pub phone_number: String,
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.id, self.full_name, self.phone_number)
    }
}
