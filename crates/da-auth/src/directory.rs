//! In-memory user directory.
//!
//! Stands in for the host application's user store: it verifies passwords
//! against Argon2id hashes and serves user records. Useful for the CLI,
//! tests, and small static deployments.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use da_federation::{CredentialVerifier, FederationError, FederationResult, UserRecordLoader};
use da_model::UserRecord;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::AuthResult;
use crate::password::PasswordHasherService;

/// One account in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Argon2 PHC hash of the account password.
    pub password_hash: String,
    /// The account's user record.
    pub record: UserRecord,
}

/// User directory held in memory, keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: RwLock<HashMap<String, DirectoryEntry>>,
    hasher: PasswordHasherService,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(hasher: PasswordHasherService) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hasher,
        }
    }

    /// Builds a directory from pre-hashed entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        let directory = Self::default();
        for entry in entries {
            directory.insert(entry);
        }
        directory
    }

    /// Loads a JSON array of [`DirectoryEntry`] values.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a configuration
    /// error if it is not a valid entry list.
    pub fn load(path: impl AsRef<Path>) -> da_core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<DirectoryEntry> = serde_json::from_str(&content).map_err(|e| {
            da_core::Error::config(format!("invalid directory file {}: {e}", path.display()))
        })?;
        Ok(Self::from_entries(entries))
    }

    /// Inserts or replaces an entry.
    pub fn insert(&self, entry: DirectoryEntry) {
        self.entries
            .write()
            .insert(entry.record.username.clone(), entry);
    }

    /// Hashes `password` and adds the account.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn add_user(&self, record: UserRecord, password: &str) -> AuthResult<()> {
        let password_hash = self.hasher.hash(password)?;
        self.insert(DirectoryEntry {
            password_hash,
            record,
        });
        Ok(())
    }

    /// Returns the number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Checks if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryDirectory {
    async fn verify(&self, username: &str, password: &str) -> FederationResult<Option<String>> {
        let credentials = {
            let entries = self.entries.read();
            entries
                .get(username)
                .map(|entry| (entry.record.id.clone(), entry.password_hash.clone()))
        };
        let Some((id, hash)) = credentials else {
            return Ok(None);
        };

        // Argon2 is CPU-bound; keep it off the async workers.
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let matched = tokio::task::spawn_blocking(move || hasher.matches(&password, &hash))
            .await
            .map_err(|e| FederationError::Internal(format!("password check join error: {e}")))?
            .map_err(|e| FederationError::credential_service(e.to_string()))?;

        Ok(matched.then_some(id))
    }
}

#[async_trait]
impl UserRecordLoader for InMemoryDirectory {
    async fn load_active_user(&self, username: &str) -> FederationResult<Option<UserRecord>> {
        Ok(self
            .entries
            .read()
            .get(username)
            .filter(|entry| entry.record.is_active())
            .map(|entry| entry.record.clone()))
    }
}
