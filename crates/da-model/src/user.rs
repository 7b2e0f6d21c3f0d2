//! User record model.
//!
//! Records are materialized once per login attempt from the host store and
//! are read-only afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::FieldValue;

/// Prefix reserved for extension field keys.
pub const EXTENSION_FIELD_PREFIX: &str = "field_";

// ============================================================================
// Base Attributes
// ============================================================================

/// The fixed identity attributes every user record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseAttribute {
    /// Globally unique identifier.
    Uuid,
    /// Opaque host identifier.
    Id,
    /// Account name.
    Username,
    /// Email address.
    Email,
    /// Display name.
    DisplayName,
    /// Role names.
    Roles,
    /// Time zone name.
    Timezone,
}

impl BaseAttribute {
    /// All base attributes, in the order they are emitted when every
    /// attribute is selected.
    pub const ALL: [Self; 7] = [
        Self::Uuid,
        Self::Id,
        Self::Username,
        Self::Email,
        Self::DisplayName,
        Self::Roles,
        Self::Timezone,
    ];

    /// Returns the canonical key for this attribute.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Id => "id",
            Self::Username => "username",
            Self::Email => "email",
            Self::DisplayName => "displayname",
            Self::Roles => "roles",
            Self::Timezone => "timezone",
        }
    }

    /// Looks up a base attribute by key.
    ///
    /// `displayName` is accepted as an alias of `displayname`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "displayName" => Some(Self::DisplayName),
            _ => Self::ALL.into_iter().find(|attr| attr.key() == key),
        }
    }
}

// ============================================================================
// Extension Fields
// ============================================================================

/// A named, shape-tagged extension field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionField {
    /// Field key (e.g. `field_organization`).
    pub key: String,
    /// Stored value.
    pub value: FieldValue,
}

impl ExtensionField {
    /// Creates a new extension field.
    #[must_use]
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Checks if the key carries the extension field prefix.
    #[must_use]
    pub fn is_extension_key(&self) -> bool {
        self.key.starts_with(EXTENSION_FIELD_PREFIX)
    }
}

/// Anything that exposes an ordered list of extension fields.
///
/// Implemented by top-level user records and by the nested records embedded
/// in aggregate fields, so both resolve through the same code path.
pub trait FieldSource {
    /// Returns the fields in their natural order.
    fn fields(&self) -> &[ExtensionField];

    /// Gets a field value by key.
    ///
    /// If the key occurs more than once, the first occurrence wins.
    fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields()
            .iter()
            .find(|f| f.key == key)
            .map(|f| &f.value)
    }

    /// Iterates over the keys of prefixed extension fields, in order.
    ///
    /// Each key is yielded once, at the position of its first occurrence,
    /// matching the value [`FieldSource::field`] returns for it.
    fn extension_keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        let mut seen = HashSet::new();
        Box::new(
            self.fields()
                .iter()
                .filter(|f| f.is_extension_key())
                .map(|f| f.key.as_str())
                .filter(move |key| seen.insert(*key)),
        )
    }
}

// ============================================================================
// User Record
// ============================================================================

/// A user account as read from the host store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque host identifier.
    pub id: String,
    /// Globally unique identifier.
    pub uuid: Uuid,
    /// Account name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Role names, in assignment order.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Time zone name.
    #[serde(default)]
    pub timezone: String,
    /// Whether the account is blocked.
    #[serde(default)]
    pub blocked: bool,
    /// Extension fields, in natural order.
    #[serde(default)]
    pub fields: Vec<ExtensionField>,
}

impl UserRecord {
    /// Creates a new active record with the given identifier and username.
    ///
    /// The display name defaults to the username.
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: id.into(),
            uuid: Uuid::now_v7(),
            display_name: username.clone(),
            username,
            email: String::new(),
            roles: Vec::new(),
            timezone: String::new(),
            blocked: false,
            fields: Vec::new(),
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Sets the time zone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Sets whether the account is blocked.
    #[must_use]
    pub const fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// Appends an extension field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push(ExtensionField::new(key, value));
        self
    }

    /// Checks if the account may log in.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.blocked
    }
}

impl FieldSource for UserRecord {
    fn fields(&self) -> &[ExtensionField] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ScalarValue;

    #[test]
    fn new_record_has_defaults() {
        let user = UserRecord::new("42", "jdoe");

        assert_eq!(user.id, "42");
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.display_name, "jdoe");
        assert!(user.is_active());
        assert!(user.roles.is_empty());
        assert!(user.fields.is_empty());
    }

    #[test]
    fn base_attribute_keys_round_trip() {
        for attr in BaseAttribute::ALL {
            assert_eq!(BaseAttribute::from_key(attr.key()), Some(attr));
        }
        assert_eq!(
            BaseAttribute::from_key("displayName"),
            Some(BaseAttribute::DisplayName)
        );
        assert_eq!(BaseAttribute::from_key("pass"), None);
        assert_eq!(BaseAttribute::from_key("field_name"), None);
    }

    #[test]
    fn extension_keys_skip_unprefixed_fields() {
        let user = UserRecord::new("1", "jdoe")
            .with_field("field_first_name", FieldValue::text(["John"]))
            .with_field("legacy_flag", FieldValue::Scalar(vec![ScalarValue::Bool(true)]))
            .with_field("field_last_name", FieldValue::text(["Doe"]));

        let keys: Vec<&str> = user.extension_keys().collect();
        assert_eq!(keys, vec!["field_first_name", "field_last_name"]);
        assert!(user.field("legacy_flag").is_some());
        assert!(user.field("field_missing").is_none());
    }

    #[test]
    fn duplicate_keys_resolve_to_first_occurrence() {
        let user = UserRecord::new("1", "jdoe")
            .with_field("field_team", FieldValue::text(["Platform"]))
            .with_field("field_site", FieldValue::text(["Berlin"]))
            .with_field("field_team", FieldValue::text(["Billing"]));

        let keys: Vec<&str> = user.extension_keys().collect();
        assert_eq!(keys, vec!["field_team", "field_site"]);
        assert_eq!(user.field("field_team"), Some(&FieldValue::text(["Platform"])));
    }

    #[test]
    fn record_deserializes_with_defaults() {
        let json = r#"{
            "id": "7",
            "uuid": "0191c5a2-8a0e-7c3e-9d43-2f4b8d7e6a10",
            "username": "ada",
            "fields": [
                { "key": "field_first_name", "value": { "type": "scalar", "items": ["Ada"] } }
            ]
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "ada");
        assert!(!user.blocked);
        assert!(user.email.is_empty());
        assert_eq!(
            user.field("field_first_name"),
            Some(&FieldValue::text(["Ada"]))
        );
    }
}
