//! Collaborator traits for the host user store.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-2: Identification and Authentication (Organizational Users)
//! - IA-5: Authenticator Management
//!
//! The bridge never inspects passwords itself; it delegates to a
//! [`CredentialVerifier`] and then loads the account through a
//! [`UserRecordLoader`]. Both run once per login attempt, before attribute
//! resolution starts.

use async_trait::async_trait;
use da_model::UserRecord;

use crate::error::FederationResult;

/// Verifies a username/password pair against the host application.
///
/// ## Security
///
/// Implementations must not log or store the plaintext password.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns the host user identifier if the credentials are valid.
    ///
    /// `Ok(None)` means the credentials were rejected. `Err` is reserved for
    /// the service itself failing.
    async fn verify(&self, username: &str, password: &str) -> FederationResult<Option<String>>;
}

/// Loads user records from the host application.
#[async_trait]
pub trait UserRecordLoader: Send + Sync {
    /// Loads the active (not blocked) account with the given username.
    ///
    /// Returns `Ok(None)` if there is no such active account.
    async fn load_active_user(&self, username: &str) -> FederationResult<Option<UserRecord>>;
}
