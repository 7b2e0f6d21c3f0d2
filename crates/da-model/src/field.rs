//! Extension field values.
//!
//! A field's declared type tag fully determines how it is resolved. The
//! variants mirror the storage shapes the host application produces.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::user::{ExtensionField, FieldSource};

/// Locale tag used when no language applies.
pub const UNDEFINED_LANGUAGE: &str = "und";

/// Property holding the rendered value of a localized item.
pub const RENDERED_VALUE_KEY: &str = "safe_value";

/// Field read from a referenced entity for display.
pub const DISPLAY_FIELD: &str = "title";

// ============================================================================
// Field Value
// ============================================================================

/// Stored value of an extension field.
///
/// Deserialization never fails on the value itself: an unknown type tag
/// becomes [`FieldValue::Unsupported`] and items that do not match the
/// declared shape become [`FieldValue::Malformed`], so one bad field cannot
/// reject the record holding it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum FieldValue {
    /// Plain values, presented together as one display string.
    Scalar(Vec<ScalarValue>),

    /// Items grouped by locale tag.
    Localized(HashMap<String, Vec<LocalizedItem>>),

    /// Pointers to other entities.
    Reference(Vec<ReferenceItem>),

    /// Embedded sub-records, each with its own extension fields.
    Aggregate(Vec<AggregateItem>),

    /// A declared type the bridge does not know how to present.
    Unsupported {
        /// The declared host type (e.g. `datetime`).
        field_type: String,
    },

    /// A known declared type whose stored items have the wrong shape.
    Malformed {
        /// The declared type.
        field_type: String,
        /// Why the items were rejected.
        reason: String,
    },
}

impl FieldValue {
    /// Creates a scalar field from text values.
    #[must_use]
    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Scalar(
            values
                .into_iter()
                .map(|v| ScalarValue::Text(v.into()))
                .collect(),
        )
    }

    /// Creates a localized field with a single rendered value under the
    /// undefined-language tag.
    #[must_use]
    pub fn localized(rendered: impl Into<String>) -> Self {
        let mut buckets = HashMap::new();
        buckets.insert(
            UNDEFINED_LANGUAGE.to_string(),
            vec![LocalizedItem::rendered(rendered)],
        );
        Self::Localized(buckets)
    }

    /// Returns the declared type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Localized(_) => "localized",
            Self::Reference(_) => "reference",
            Self::Aggregate(_) => "aggregate",
            Self::Unsupported { field_type } | Self::Malformed { field_type, .. } => field_type,
        }
    }

    /// Checks if the field holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(items) => items.is_empty(),
            Self::Localized(buckets) => buckets.values().all(Vec::is_empty),
            Self::Reference(items) => items.is_empty(),
            Self::Aggregate(items) => items.is_empty(),
            Self::Unsupported { .. } | Self::Malformed { .. } => true,
        }
    }

    /// Builds a field value from its declared type tag and raw items.
    #[must_use]
    pub fn from_parts(field_type: &str, items: Value) -> Self {
        let parsed = match field_type {
            "scalar" => serde_json::from_value(items).map(Self::Scalar),
            "localized" => serde_json::from_value(items).map(Self::Localized),
            "reference" => serde_json::from_value(items).map(Self::Reference),
            "aggregate" => serde_json::from_value(items).map(Self::Aggregate),
            "unsupported" => serde_json::from_value::<UnsupportedItems>(items)
                .map(|items| Self::Unsupported {
                    field_type: items.field_type,
                }),
            "malformed" => serde_json::from_value::<MalformedItems>(items).map(|items| {
                Self::Malformed {
                    field_type: items.field_type,
                    reason: items.reason,
                }
            }),
            other => {
                return Self::Unsupported {
                    field_type: other.to_string(),
                }
            }
        };

        parsed.unwrap_or_else(|e| Self::Malformed {
            field_type: field_type.to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct UnsupportedItems {
    field_type: String,
}

#[derive(Deserialize)]
struct MalformedItems {
    field_type: String,
    #[serde(default)]
    reason: String,
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;

        let Value::Object(map) = raw else {
            return Ok(Self::Malformed {
                field_type: String::new(),
                reason: "field value is not an object".to_string(),
            });
        };

        let Some(field_type) = map.get("type").and_then(Value::as_str) else {
            return Ok(Self::Malformed {
                field_type: String::new(),
                reason: "missing type tag".to_string(),
            });
        };

        let items = map.get("items").cloned().unwrap_or(Value::Null);
        Ok(Self::from_parts(field_type, items))
    }
}

// ============================================================================
// Scalar Values
// ============================================================================

/// A plain stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Host stores booleans as 1/0.
            Self::Bool(b) => write!(f, "{}", u8::from(*b)),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// ============================================================================
// Localized Items
// ============================================================================

/// One item under a locale bucket: a set of named properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedItem {
    /// Named properties (`value`, `format`, `safe_value`, ...).
    pub properties: HashMap<String, String>,
}

impl LocalizedItem {
    /// Creates an item carrying only a rendered value.
    #[must_use]
    pub fn rendered(value: impl Into<String>) -> Self {
        let mut properties = HashMap::new();
        properties.insert(RENDERED_VALUE_KEY.to_string(), value.into());
        Self { properties }
    }

    /// Gets the rendered value.
    #[must_use]
    pub fn rendered_value(&self) -> Option<&str> {
        self.properties.get(RENDERED_VALUE_KEY).map(String::as_str)
    }
}

// ============================================================================
// References
// ============================================================================

/// Pointer to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    /// Identifier of the referenced entity.
    pub target_id: String,
    /// The referenced entity, if it could be loaded.
    #[serde(default)]
    pub target: Option<ReferencedEntity>,
}

impl ReferenceItem {
    /// Creates a reference to a loaded entity.
    #[must_use]
    pub fn new(target_id: impl Into<String>, target: ReferencedEntity) -> Self {
        Self {
            target_id: target_id.into(),
            target: Some(target),
        }
    }

    /// Creates a reference whose target is missing.
    #[must_use]
    pub fn dangling(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            target: None,
        }
    }
}

/// A referenced entity, reduced to its multi-valued fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedEntity {
    /// Field values keyed by field name.
    #[serde(default)]
    pub fields: HashMap<String, Vec<String>>,
}

impl ReferencedEntity {
    /// Creates an entity with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        let mut fields = HashMap::new();
        fields.insert(DISPLAY_FIELD.to_string(), vec![title.into()]);
        Self { fields }
    }

    /// Gets the first value of the display field, if it is non-empty.
    #[must_use]
    pub fn display_value(&self) -> Option<&str> {
        self.fields
            .get(DISPLAY_FIELD)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Pointer to an embedded sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateItem {
    /// Identifier of the sub-record.
    pub target_id: String,
    /// The sub-record, if it could be loaded.
    #[serde(default)]
    pub record: Option<NestedRecord>,
}

impl AggregateItem {
    /// Creates an item holding a loaded sub-record.
    #[must_use]
    pub fn new(target_id: impl Into<String>, record: NestedRecord) -> Self {
        Self {
            target_id: target_id.into(),
            record: Some(record),
        }
    }

    /// Creates an item whose sub-record is missing.
    #[must_use]
    pub fn dangling(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            record: None,
        }
    }
}

/// A sub-record embedded in an aggregate field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedRecord {
    /// Extension fields, in natural order.
    #[serde(default)]
    pub fields: Vec<ExtensionField>,
}

impl NestedRecord {
    /// Creates an empty sub-record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an extension field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push(ExtensionField::new(key, value));
        self
    }
}

impl FieldSource for NestedRecord {
    fn fields(&self) -> &[ExtensionField] {
        &self.fields
    }
}
