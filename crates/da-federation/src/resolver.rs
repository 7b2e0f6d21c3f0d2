//! Field resolution.
//!
//! Flattens one attribute of a user record into either a single display
//! string or an ordered list of strings, dispatching on the field's declared
//! shape. Aggregate fields recurse into their sub-records.

use std::collections::HashMap;

use da_model::{
    AggregateItem, BaseAttribute, FieldSource, FieldValue, LocalizedItem, ReferenceItem,
    ScalarValue, UserRecord, UNDEFINED_LANGUAGE,
};

use crate::diagnostics::{DiagnosticSink, ResolutionAnomaly};

/// Separator between the values of a scalar field.
pub const SCALAR_SEPARATOR: &str = ", ";

/// Separator between the fields of one aggregate item.
pub const INNER_SEPARATOR: &str = " : ";

/// Separator used when a nested aggregate's items are folded into the
/// composite string of their parent item.
pub const OUTER_SEPARATOR: &str = " | ";

/// Maximum aggregate nesting depth. Deeper content resolves as empty.
pub const MAX_DEPTH: usize = 8;

// ============================================================================
// Resolved Value
// ============================================================================

/// Result of resolving one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// A single display string.
    Single(String),
    /// An ordered list of strings.
    Multiple(Vec<String>),
}

impl ResolvedValue {
    /// The empty single value.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Single(String::new())
    }

    /// Checks if the value carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Multiple(values) => values.is_empty(),
        }
    }

    /// Normalizes into the list form used in the attribute map.
    ///
    /// A single value becomes a one-element list; a list is kept as is.
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::Multiple(values) => values,
        }
    }

    /// Folds the value into one string.
    #[must_use]
    pub fn into_display_string(self) -> String {
        match self {
            Self::Single(s) => s,
            Self::Multiple(values) => values.join(OUTER_SEPARATOR),
        }
    }
}

// ============================================================================
// Field Resolver
// ============================================================================

/// Resolves record attributes into strings.
///
/// The resolver is stateless apart from its diagnostic sink and depth limit;
/// resolving the same record twice yields the same result.
pub struct FieldResolver<'a> {
    sink: &'a dyn DiagnosticSink,
    max_depth: usize,
}

impl<'a> FieldResolver<'a> {
    /// Creates a resolver reporting to the given sink.
    #[must_use]
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            sink,
            max_depth: MAX_DEPTH,
        }
    }

    /// Overrides the maximum aggregate nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves a base attribute or extension field by key.
    ///
    /// Unknown keys resolve as empty and are reported to the sink.
    pub fn resolve(&self, record: &UserRecord, key: &str) -> ResolvedValue {
        match BaseAttribute::from_key(key) {
            Some(attr) => Self::resolve_base(record, attr),
            None => self.resolve_field(record, key),
        }
    }

    /// Reads a base attribute.
    #[must_use]
    pub fn resolve_base(record: &UserRecord, attr: BaseAttribute) -> ResolvedValue {
        match attr {
            BaseAttribute::Uuid => ResolvedValue::Single(record.uuid.to_string()),
            BaseAttribute::Id => ResolvedValue::Single(record.id.clone()),
            BaseAttribute::Username => ResolvedValue::Single(record.username.clone()),
            BaseAttribute::Email => ResolvedValue::Single(record.email.clone()),
            BaseAttribute::DisplayName => ResolvedValue::Single(record.display_name.clone()),
            BaseAttribute::Roles => ResolvedValue::Multiple(record.roles.clone()),
            BaseAttribute::Timezone => ResolvedValue::Single(record.timezone.clone()),
        }
    }

    /// Resolves an extension field on any field source.
    pub fn resolve_field<S>(&self, source: &S, key: &str) -> ResolvedValue
    where
        S: FieldSource + ?Sized,
    {
        match source.field(key) {
            Some(value) => self.resolve_value(key, value, 0),
            None => {
                self.sink.anomaly(&ResolutionAnomaly::UnknownKey {
                    key: key.to_string(),
                });
                ResolvedValue::empty()
            }
        }
    }

    fn resolve_value(&self, key: &str, value: &FieldValue, depth: usize) -> ResolvedValue {
        match value {
            FieldValue::Scalar(items) => Self::resolve_scalar(items),
            FieldValue::Localized(buckets) => Self::resolve_localized(buckets),
            FieldValue::Reference(items) => self.resolve_reference(key, items),
            FieldValue::Aggregate(items) => self.resolve_aggregate(key, items, depth),
            FieldValue::Unsupported { field_type } => {
                self.sink.anomaly(&ResolutionAnomaly::UnsupportedShape {
                    key: key.to_string(),
                    field_type: field_type.clone(),
                });
                ResolvedValue::empty()
            }
            FieldValue::Malformed { field_type, reason } => {
                self.sink.anomaly(&ResolutionAnomaly::ShapeMismatch {
                    key: key.to_string(),
                    field_type: field_type.clone(),
                    reason: reason.clone(),
                });
                ResolvedValue::empty()
            }
        }
    }

    fn resolve_scalar(items: &[ScalarValue]) -> ResolvedValue {
        let joined = items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(SCALAR_SEPARATOR);
        ResolvedValue::Single(joined)
    }

    fn resolve_localized(buckets: &HashMap<String, Vec<LocalizedItem>>) -> ResolvedValue {
        let rendered = buckets
            .get(UNDEFINED_LANGUAGE)
            .and_then(|items| items.first())
            .and_then(LocalizedItem::rendered_value)
            .unwrap_or_default();
        ResolvedValue::Single(rendered.to_string())
    }

    fn resolve_reference(&self, key: &str, items: &[ReferenceItem]) -> ResolvedValue {
        let mut out = String::new();

        for item in items {
            let Some(target) = &item.target else {
                self.sink.anomaly(&ResolutionAnomaly::MissingReferenceTarget {
                    key: key.to_string(),
                    target_id: item.target_id.clone(),
                });
                continue;
            };

            // Last non-empty title wins.
            if let Some(title) = target.display_value() {
                out = title.to_string();
            }
        }

        ResolvedValue::Single(out)
    }

    fn resolve_aggregate(&self, key: &str, items: &[AggregateItem], depth: usize) -> ResolvedValue {
        if depth >= self.max_depth {
            self.sink.anomaly(&ResolutionAnomaly::DepthExceeded {
                key: key.to_string(),
                depth,
            });
            return ResolvedValue::Multiple(Vec::new());
        }

        let mut composites = Vec::with_capacity(items.len());

        for item in items {
            let Some(record) = &item.record else {
                self.sink.anomaly(&ResolutionAnomaly::MissingAggregateTarget {
                    key: key.to_string(),
                    target_id: item.target_id.clone(),
                });
                continue;
            };

            let parts: Vec<String> = record
                .extension_keys()
                .filter_map(|field_key| {
                    record.field(field_key).map(|value| {
                        self.resolve_value(field_key, value, depth + 1)
                            .into_display_string()
                    })
                })
                .collect();

            composites.push(parts.join(INNER_SEPARATOR));
        }

        ResolvedValue::Multiple(composites)
    }
}
