//! Diagnostic sinks for resolution anomalies.
//!
//! The resolver never logs directly; it reports through an injected
//! [`DiagnosticSink`]. Production code uses [`TracingSink`], callers that
//! want to inspect anomalies (tests, the CLI) use [`MemorySink`].

use std::fmt;

use parking_lot::Mutex;

use crate::resolver::ResolvedValue;

/// Something unexpected found while resolving a field.
///
/// Every anomaly resolves the affected field (or item) as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionAnomaly {
    /// The key names neither a base attribute nor a field on the record.
    UnknownKey {
        /// Requested key.
        key: String,
    },
    /// The field's declared type has no resolution rule.
    UnsupportedShape {
        /// Field key.
        key: String,
        /// Declared type.
        field_type: String,
    },
    /// The field's stored items do not match its declared type.
    ShapeMismatch {
        /// Field key.
        key: String,
        /// Declared type.
        field_type: String,
        /// Why the items were rejected.
        reason: String,
    },
    /// A reference points at an entity that was not loaded.
    MissingReferenceTarget {
        /// Field key.
        key: String,
        /// Referenced identifier.
        target_id: String,
    },
    /// An aggregate item points at a sub-record that was not loaded.
    MissingAggregateTarget {
        /// Field key.
        key: String,
        /// Sub-record identifier.
        target_id: String,
    },
    /// Aggregate nesting went deeper than the resolver allows.
    DepthExceeded {
        /// Field key.
        key: String,
        /// Depth at which resolution stopped.
        depth: usize,
    },
}

impl ResolutionAnomaly {
    /// Returns the key of the field the anomaly was found on.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownKey { key }
            | Self::UnsupportedShape { key, .. }
            | Self::ShapeMismatch { key, .. }
            | Self::MissingReferenceTarget { key, .. }
            | Self::MissingAggregateTarget { key, .. }
            | Self::DepthExceeded { key, .. } => key,
        }
    }
}

impl fmt::Display for ResolutionAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey { key } => write!(f, "unknown attribute key '{key}'"),
            Self::UnsupportedShape { key, field_type } => {
                write!(f, "field '{key}' has unsupported type '{field_type}'")
            }
            Self::ShapeMismatch {
                key,
                field_type,
                reason,
            } => write!(f, "field '{key}' does not match declared type '{field_type}': {reason}"),
            Self::MissingReferenceTarget { key, target_id } => {
                write!(f, "field '{key}' references missing entity '{target_id}'")
            }
            Self::MissingAggregateTarget { key, target_id } => {
                write!(f, "field '{key}' embeds missing record '{target_id}'")
            }
            Self::DepthExceeded { key, depth } => {
                write!(f, "field '{key}' nested beyond depth {depth}")
            }
        }
    }
}

/// Receives diagnostics from the resolver and assembler.
pub trait DiagnosticSink: Send + Sync {
    /// Records a resolution anomaly.
    fn anomaly(&self, anomaly: &ResolutionAnomaly);

    /// Observes a successfully resolved attribute.
    fn resolved(&self, _key: &str, _value: &ResolvedValue) {}
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn anomaly(&self, _anomaly: &ResolutionAnomaly) {}
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    verbose: bool,
}

impl TracingSink {
    /// Creates a sink that only reports anomalies.
    #[must_use]
    pub const fn new() -> Self {
        Self { verbose: false }
    }

    /// Creates a sink that also traces every resolved attribute.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Creates a sink honoring the configuration's debug flag.
    #[must_use]
    pub const fn from_debug_flag(debug: bool) -> Self {
        Self { verbose: debug }
    }
}

impl DiagnosticSink for TracingSink {
    fn anomaly(&self, anomaly: &ResolutionAnomaly) {
        tracing::warn!(key = %anomaly.key(), "Attribute resolution anomaly: {}", anomaly);
    }

    fn resolved(&self, key: &str, value: &ResolvedValue) {
        if self.verbose {
            tracing::debug!(key = %key, value = ?value, "Resolved attribute");
        }
    }
}

/// Collects anomalies in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    anomalies: Mutex<Vec<ResolutionAnomaly>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the anomalies recorded so far.
    #[must_use]
    pub fn anomalies(&self) -> Vec<ResolutionAnomaly> {
        self.anomalies.lock().clone()
    }

    /// Checks if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anomalies.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn anomaly(&self, anomaly: &ResolutionAnomaly) {
        self.anomalies.lock().push(anomaly.clone());
    }
}
