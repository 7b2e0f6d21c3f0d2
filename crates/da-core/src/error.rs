//! Error handling for the bridge.
//!
//! ## NIST 800-53 Rev5: SI-11 (Error Handling)
//!
//! Messages are informative for operators without exposing account state to
//! end users.

use thiserror::Error;

/// Result type alias using the bridge error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bridge setup and login.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration or fixtures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    ///
    /// ## NIST 800-53 Rev5: IA-6 (Authentication Feedback)
    ///
    /// Unknown users, wrong passwords and blocked accounts all map here.
    #[error("authentication failed")]
    Authentication,

    /// A collaborator (credential service, user store) failed.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Internal error.
    #[error("internal error")]
    Internal,
}

impl Error {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_) | Self::Internal)
    }

    /// Returns whether this error was caused by the caller.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}
