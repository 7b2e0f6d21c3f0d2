//! # da-core
//!
//! Core configuration and error handling for the directory SSO bridge.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-6: Authentication feedback (generic authentication errors)
//! - SI-11: Error handling

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;

pub use config::{AttributeConfig, BridgeConfig};
pub use error::{Error, Result};
