//! Attribute assembly.
//!
//! Walks the selected key mappings, drops denylisted keys, resolves the rest
//! and builds the attribute map released to the SSO layer.
//!
//! ## NIST 800-53 Rev5: IA-5 (Authenticator Management)
//!
//! Credential fields are on a fixed denylist and are never released, whatever
//! the configured policy says.

use std::collections::HashSet;

use da_model::UserRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::diagnostics::DiagnosticSink;
use crate::resolver::FieldResolver;
use crate::selector::{AttributeSelector, KeyMapping, SelectionPolicy};

/// Source keys that are never released.
pub const DEFAULT_DENYLIST: &[&str] = &["pass"];

// ============================================================================
// Denylist
// ============================================================================

/// A fixed set of source keys excluded from every attribute map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    keys: HashSet<String>,
}

impl Denylist {
    /// Creates a denylist from the given keys.
    #[must_use]
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks if a source key is denied.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

// ============================================================================
// Attribute Map
// ============================================================================

/// Output attributes in first-insertion order.
///
/// Writing a name that is already present replaces its values in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the values for a name, overwriting any earlier write.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = values,
            None => self.entries.push((name, values)),
        }
    }

    /// Gets the values for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Checks if a name is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over the attribute names, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, values)` pairs, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AttributeMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

// ============================================================================
// Assembler
// ============================================================================

/// Builds attribute maps from user records.
pub struct AttributeAssembler<'a> {
    denylist: Denylist,
    resolver: FieldResolver<'a>,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> AttributeAssembler<'a> {
    /// Creates an assembler with the given denylist, reporting to `sink`.
    #[must_use]
    pub fn new(denylist: Denylist, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            denylist,
            resolver: FieldResolver::new(sink),
            sink,
        }
    }

    /// Replaces the field resolver (e.g. to change the depth limit).
    #[must_use]
    pub fn with_resolver(mut self, resolver: FieldResolver<'a>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolves each mapping in order into an attribute map.
    ///
    /// Denylisted sources are skipped entirely. Later mappings to the same
    /// output name overwrite earlier ones.
    pub fn assemble(&self, record: &UserRecord, mappings: &[KeyMapping]) -> AttributeMap {
        let mut attributes = AttributeMap::new();

        for mapping in mappings {
            if self.denylist.contains(&mapping.source) {
                tracing::debug!(source = %mapping.source, "Skipping denylisted attribute");
                continue;
            }

            let value = self.resolver.resolve(record, &mapping.source);
            self.sink.resolved(&mapping.output, &value);
            attributes.insert(mapping.output.clone(), value.into_values());
        }

        attributes
    }

    /// Selects the mappings for `policy` and assembles them.
    pub fn assemble_policy(&self, record: &UserRecord, policy: &SelectionPolicy) -> AttributeMap {
        let mappings = AttributeSelector::select(policy, record);
        self.assemble(record, &mappings)
    }
}
