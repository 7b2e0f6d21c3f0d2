//! # da-auth
//!
//! Username/password authentication source for the directory SSO bridge.
//!
//! [`UserPassSource`] verifies credentials through the host application,
//! loads the account, and releases its attributes according to the bridge
//! configuration.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-2: Identification and Authentication
//! - IA-5: Authenticator Management
//! - IA-6: Authentication Feedback
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use da_auth::{InMemoryDirectory, UserPassSource};
//! use da_core::BridgeConfig;
//!
//! let directory = Arc::new(InMemoryDirectory::load("users.json")?);
//! let source = UserPassSource::new(
//!     BridgeConfig::load("bridge.toml")?,
//!     directory.clone(),
//!     directory,
//! )?;
//! let attributes = source.login("jdoe", "secret").await?;
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod directory;
pub mod error;
pub mod password;
pub mod source;

pub use directory::{DirectoryEntry, InMemoryDirectory};
pub use error::{AuthError, AuthResult};
pub use password::{PasswordHasherService, PasswordPolicy};
pub use source::UserPassSource;
