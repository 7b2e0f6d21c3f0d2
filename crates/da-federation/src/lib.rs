//! # da-federation
//!
//! Attribute resolution for the directory SSO bridge.
//!
//! Given an authenticated [`UserRecord`](da_model::UserRecord) and a
//! selection policy, this crate produces the ordered attribute map handed to
//! the SSO assertion layer:
//!
//! - [`AttributeSelector`] turns the policy into `(source, output)` pairs.
//! - [`FieldResolver`] flattens one field into a string or a list of strings.
//! - [`AttributeAssembler`] applies the denylist and builds the final map.
//!
//! Malformed field data never fails the whole mapping; it is reported to a
//! [`DiagnosticSink`] and resolved as empty.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - AC-21: Information sharing (explicit attribute release policy)
//! - IA-5: Authenticator management (credential fields are never released)

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod assembler;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod selector;

pub use assembler::{AttributeAssembler, AttributeMap, Denylist, DEFAULT_DENYLIST};
pub use diagnostics::{DiagnosticSink, MemorySink, NullSink, ResolutionAnomaly, TracingSink};
pub use error::{FederationError, FederationResult};
pub use provider::{CredentialVerifier, UserRecordLoader};
pub use resolver::{FieldResolver, ResolvedValue, MAX_DEPTH};
pub use selector::{AttributeSelector, KeyMapping, SelectionPolicy};
