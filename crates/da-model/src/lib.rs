//! # da-model
//!
//! Domain model for the directory SSO bridge.
//!
//! A [`UserRecord`] is the host application's view of one account: a fixed
//! set of base attributes plus an ordered list of shape-tagged extension
//! fields. Extension fields may reference other entities or embed nested
//! records, which in turn carry their own extension fields.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod field;
pub mod user;

pub use field::{
    AggregateItem, FieldValue, LocalizedItem, NestedRecord, ReferenceItem, ReferencedEntity,
    ScalarValue, DISPLAY_FIELD, RENDERED_VALUE_KEY, UNDEFINED_LANGUAGE,
};
pub use user::{BaseAttribute, ExtensionField, FieldSource, UserRecord, EXTENSION_FIELD_PREFIX};
