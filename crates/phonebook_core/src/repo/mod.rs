//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate their input before any SQL mutation.
//! - Repository APIs return semantic errors (`Validation`) in addition to DB
//!   transport errors.

pub mod contact_repo;
