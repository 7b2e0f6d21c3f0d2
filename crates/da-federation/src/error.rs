//! Federation error types.
//!
//! Only collaborator and configuration problems surface as errors here.
//! Field resolution problems are reported through the diagnostic sink.

use thiserror::Error;

/// Errors raised by the bridge's external collaborators.
#[derive(Debug, Error)]
pub enum FederationError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The credential service could not be reached or failed.
    #[error("Credential service error: {0}")]
    CredentialService(String),

    /// The user store could not be reached or failed.
    #[error("User lookup error: {0}")]
    UserLookup(String),

    /// Operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Internal error.
    #[error("Internal federation error: {0}")]
    Internal(String),
}

impl FederationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a credential service error.
    #[must_use]
    pub fn credential_service(msg: impl Into<String>) -> Self {
        Self::CredentialService(msg.into())
    }

    /// Creates a user lookup error.
    #[must_use]
    pub fn user_lookup(msg: impl Into<String>) -> Self {
        Self::UserLookup(msg.into())
    }

    /// Checks if this error came from an external collaborator.
    #[must_use]
    pub const fn is_collaborator_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialService(_) | Self::UserLookup(_) | Self::Timeout(_)
        )
    }
}

impl From<da_core::Error> for FederationError {
    fn from(err: da_core::Error) -> Self {
        match err {
            da_core::Error::Config(msg) => Self::Configuration(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result type for federation operations.
pub type FederationResult<T> = Result<T, FederationError>;
