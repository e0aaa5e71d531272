//! User record as stored in the flat credentials file.

use serde::{Deserialize, Serialize};

/// A single `username,password` row of the user store.
///
/// Passwords are stored as entered (no hashing); both fields are compared
/// after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether this record matches the given credentials, ignoring
    /// surrounding whitespace on both sides. Case-sensitive.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username.trim() == username.trim() && self.password.trim() == password.trim()
    }
}
