//! Flat CSV file user store.
//!
//! Backing format: a CSV file with header `username,password`, one record
//! per row, plaintext fields. An absent or malformed file is silently reset
//! to an empty store; prior contents are discarded.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::UserStore;
use crate::domain::{DomainError, UserRecord};

const HEADER: [&str; 2] = ["username", "password"];

/// CSV-file-backed [`UserStore`].
///
/// A process-local mutex serializes file access between handlers of this
/// server. Other processes sharing the file are not serialized; concurrent
/// signups can race on the uniqueness check and both succeed.
pub struct CsvUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records, resetting the file to an empty store if it is
    /// absent or does not parse. Caller must hold the lock.
    fn read_or_reset(&self) -> Result<Vec<UserRecord>, DomainError> {
        match self.try_read() {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    "user store unreadable ({e}), resetting to empty"
                );
                self.reset()?;
                Ok(Vec::new())
            }
        }
    }

    fn try_read(&self) -> Result<Vec<UserRecord>, DomainError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        if reader.headers()? != &csv::StringRecord::from(HEADER.to_vec()) {
            return Err(DomainError::Storage("unexpected header".into()));
        }
        let mut users = Vec::new();
        for record in reader.deserialize() {
            users.push(record?);
        }
        Ok(users)
    }

    /// Overwrite the file with just the header row.
    fn reset(&self) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for CsvUserStore {
    async fn load_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        let _guard = self.lock.lock().await;
        self.read_or_reset()
    }

    async fn append(&self, username: &str, password: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        // Heal the file first so the appended row lands under a valid header.
        self.read_or_reset()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(UserRecord::new(username.trim(), password.trim()))?;
        writer.flush()?;
        Ok(())
    }

    async fn exists(&self, username: &str) -> Result<bool, DomainError> {
        let _guard = self.lock.lock().await;
        let users = self.read_or_reset()?;
        let needle = username.trim();
        Ok(users.iter().any(|u| u.username.trim() == needle))
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DomainError> {
        let _guard = self.lock.lock().await;
        let users = self.read_or_reset()?;
        Ok(users.iter().any(|u| u.matches(username, password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CsvUserStore {
        CsvUserStore::new(dir.path().join("users.csv"))
    }

    #[tokio::test]
    async fn absent_file_initializes_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load_all().await.unwrap().is_empty());
        // Side effect: the file now exists with the expected header.
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.trim_end(), "username,password");
    }

    #[tokio::test]
    async fn malformed_file_self_heals_and_discards() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "name,secret\nalice,hunter2\n").unwrap();

        assert!(store.load_all().await.unwrap().is_empty());
        assert!(!store.authenticate("alice", "hunter2").await.unwrap());
    }

    #[tokio::test]
    async fn signup_then_login_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append("  alice  ", " hunter2 ").await.unwrap();
        assert!(store.authenticate("alice", "hunter2").await.unwrap());
        assert!(store.authenticate(" alice ", "hunter2").await.unwrap());
        assert!(store.exists("alice").await.unwrap());

        let users = store.load_all().await.unwrap();
        assert_eq!(users, vec![UserRecord::new("alice", "hunter2")]);
    }

    #[tokio::test]
    async fn authenticate_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append("alice", "hunter2").await.unwrap();
        assert!(!store.authenticate("Alice", "hunter2").await.unwrap());
        assert!(!store.authenticate("alice", "Hunter2").await.unwrap());
        assert!(!store.authenticate("alice", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn append_does_not_deduplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append("alice", "one").await.unwrap();
        store.append("alice", "two").await.unwrap();

        let users = store.load_all().await.unwrap();
        assert_eq!(users.len(), 2);
        // Both passwords authenticate; the store itself never rejects.
        assert!(store.authenticate("alice", "one").await.unwrap());
        assert!(store.authenticate("alice", "two").await.unwrap());
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = store_in(&dir);
            store.append("bob", "pw").await.unwrap();
        }
        let store = store_in(&dir);
        assert!(store.exists("bob").await.unwrap());
    }
}
