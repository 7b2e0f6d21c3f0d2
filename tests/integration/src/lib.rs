//! End-to-end tests for the directory SSO bridge live in `tests/`.
