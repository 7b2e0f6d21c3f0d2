//! Authentication error types.

use std::fmt;

use da_federation::FederationError;

/// Authentication operation errors.
#[derive(Debug)]
pub enum AuthError {
    /// Wrong username or password, unknown user, or blocked account.
    ///
    /// These cases are deliberately indistinguishable to the caller.
    InvalidCredentials,
    /// A collaborator (credential service, user store) failed.
    ServiceUnavailable(String),
    /// The authentication source is misconfigured.
    Configuration(String),
    /// Internal error.
    Internal(String),
}

impl AuthError {
    /// Checks if this is the generic wrong-credentials outcome.
    #[must_use]
    pub const fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "wrong username or password"),
            Self::ServiceUnavailable(msg) => write!(f, "authentication service unavailable: {msg}"),
            Self::Configuration(msg) => write!(f, "authentication source misconfigured: {msg}"),
            Self::Internal(msg) => write!(f, "internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<FederationError> for AuthError {
    fn from(err: FederationError) -> Self {
        match err {
            FederationError::Configuration(msg) => Self::Configuration(msg),
            FederationError::Internal(msg) => Self::Internal(msg),
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<da_core::Error> for AuthError {
    fn from(err: da_core::Error) -> Self {
        match err {
            da_core::Error::Config(msg) => Self::Configuration(msg),
            da_core::Error::Authentication => Self::InvalidCredentials,
            da_core::Error::Unavailable(msg) => Self::ServiceUnavailable(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for da_core::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Authentication,
            AuthError::ServiceUnavailable(msg) => Self::Unavailable(msg),
            AuthError::Configuration(msg) => Self::Config(msg),
            AuthError::Internal(_) => Self::Internal,
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
