//! End-to-End Integration Tests
//!
//! These tests drive the complete login path: credential verification,
//! account loading, attribute selection, resolution and release.

mod common;
mod attribute_release;
mod login_flows;
