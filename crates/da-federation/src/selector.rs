//! Attribute selection.
//!
//! Turns the configured release policy into the ordered list of
//! `(source, output)` pairs the assembler walks.

use da_core::BridgeConfig;
use da_model::{BaseAttribute, FieldSource, UserRecord};

/// One attribute to release: where to read it and what to call it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyMapping {
    /// Record key (base attribute or extension field).
    pub source: String,
    /// Output attribute name.
    pub output: String,
}

impl KeyMapping {
    /// Creates a new mapping.
    #[must_use]
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    /// Creates a mapping that keeps the source name.
    #[must_use]
    pub fn identity(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            output: key.clone(),
            source: key,
        }
    }
}

/// Which attributes to release.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Every base attribute and every extension field, under its own name.
    #[default]
    All,
    /// Exactly these mappings, in this order.
    Explicit(Vec<KeyMapping>),
}

impl SelectionPolicy {
    /// Builds an explicit policy from `(source, output)` pairs.
    #[must_use]
    pub fn explicit<I, S, O>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, O)>,
        S: Into<String>,
        O: Into<String>,
    {
        Self::Explicit(
            pairs
                .into_iter()
                .map(|(source, output)| KeyMapping::new(source, output))
                .collect(),
        )
    }

    /// Derives the policy from bridge configuration.
    #[must_use]
    pub fn from_config(config: &BridgeConfig) -> Self {
        match &config.attributes {
            None => Self::All,
            Some(attributes) => Self::Explicit(
                attributes
                    .iter()
                    .map(|attr| KeyMapping::new(&attr.source, &attr.output))
                    .collect(),
            ),
        }
    }
}

/// Computes the key mappings for a record under a policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSelector;

impl AttributeSelector {
    /// Returns the mappings to resolve, in order.
    ///
    /// For [`SelectionPolicy::All`] this is every base attribute in fixed
    /// order followed by the record's extension fields in natural order.
    /// Explicit policies are returned unchanged, duplicates included.
    #[must_use]
    pub fn select(policy: &SelectionPolicy, record: &UserRecord) -> Vec<KeyMapping> {
        match policy {
            SelectionPolicy::All => BaseAttribute::ALL
                .iter()
                .map(|attr| KeyMapping::identity(attr.key()))
                .chain(record.extension_keys().map(KeyMapping::identity))
                .collect(),
            SelectionPolicy::Explicit(mappings) => mappings.clone(),
        }
    }
}
