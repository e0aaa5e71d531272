//! User credential storage.
//!
//! The store is a key-value mapping keyed by username, defined behind a
//! small trait so the backend (flat file today) can be swapped without
//! touching the auth handlers.

mod csv_file;

pub use csv_file::CsvUserStore;

use async_trait::async_trait;

use crate::domain::{DomainError, UserRecord};

/// Credential store interface.
///
/// Uniqueness of usernames is the caller's responsibility: `append` writes
/// unconditionally, and a concurrent `exists` check in another process can
/// race with it. Last write wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every stored record.
    async fn load_all(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// Append a new record, trimming surrounding whitespace from both
    /// fields. Does not check uniqueness.
    async fn append(&self, username: &str, password: &str) -> Result<(), DomainError>;

    /// Whether a record with this (trimmed) username exists.
    async fn exists(&self, username: &str) -> Result<bool, DomainError>;

    /// Whether any record matches both fields exactly after trimming.
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DomainError>;
}
