//! Domain model for the contact store.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every contact is identified by a store-assigned `ContactId`.
//! - Deletion is a hard delete; ids are never handed out again.

pub mod contact;
