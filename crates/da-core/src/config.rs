//! Bridge configuration.
//!
//! Loaded once at startup (usually from TOML) and passed explicitly to the
//! components that need it.
//!
//! ```toml
//! store_root = "/var/www/site"
//! debug = false
//!
//! [[attributes]]
//! source = "username"
//! output = "cn"
//!
//! [[attributes]]
//! source = "field_organization"
//! output = "ou"
//! ```
//!
//! Omitting `attributes` exposes every base attribute and extension field
//! under its own name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One configured attribute: which record field to read and what to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConfig {
    /// Record field key.
    #[serde(alias = "drupaluservar")]
    pub source: String,

    /// Output attribute name.
    #[serde(alias = "callit")]
    pub output: String,
}

impl AttributeConfig {
    /// Creates a new attribute entry.
    #[must_use]
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }
}

/// Configuration for one authentication source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Root directory of the host application.
    #[serde(default)]
    pub store_root: String,

    /// Emit per-attribute resolution traces.
    #[serde(default)]
    pub debug: bool,

    /// Attributes to expose; `None` exposes everything.
    #[serde(default)]
    pub attributes: Option<Vec<AttributeConfig>>,
}

impl BridgeConfig {
    /// Creates a configuration exposing every attribute.
    #[must_use]
    pub fn new(store_root: impl Into<String>) -> Self {
        Self {
            store_root: store_root.into(),
            debug: false,
            attributes: None,
        }
    }

    /// Sets the debug flag.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Adds an attribute entry, switching to explicit selection.
    #[must_use]
    pub fn with_attribute(mut self, source: impl Into<String>, output: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(Vec::new)
            .push(AttributeConfig::new(source, output));
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is malformed or invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or [`Error::Config`]
    /// if it is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.store_root.trim().is_empty() {
            return Err(Error::config("store_root must be set"));
        }

        for (index, attr) in self.attributes.iter().flatten().enumerate() {
            if attr.source.is_empty() {
                return Err(Error::config(format!(
                    "attributes[{index}]: source must not be empty"
                )));
            }
            if attr.output.is_empty() {
                return Err(Error::config(format!(
                    "attributes[{index}]: output must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Checks if every attribute should be exposed.
    #[must_use]
    pub const fn selects_all(&self) -> bool {
        self.attributes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_explicit_attributes_in_order() {
        let config = BridgeConfig::from_toml_str(
            r#"
            store_root = "/var/www/site"
            debug = true

            [[attributes]]
            source = "username"
            output = "cn"

            [[attributes]]
            source = "field_organization"
            output = "ou"
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert!(!config.selects_all());
        assert_eq!(
            config.attributes,
            Some(vec![
                AttributeConfig::new("username", "cn"),
                AttributeConfig::new("field_organization", "ou"),
            ])
        );
    }

    #[test]
    fn accepts_legacy_attribute_keys() {
        let config = BridgeConfig::from_toml_str(
            r#"
            store_root = "/srv/cms"

            [[attributes]]
            drupaluservar = "mail"
            callit = "mail"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.attributes,
            Some(vec![AttributeConfig::new("mail", "mail")])
        );
    }

    #[test]
    fn missing_attributes_selects_all() {
        let config = BridgeConfig::from_toml_str(r#"store_root = "/srv/cms""#).unwrap();
        assert!(config.selects_all());
        assert!(!config.debug);
    }

    #[test]
    fn rejects_missing_store_root() {
        let err = BridgeConfig::from_toml_str("debug = true").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("store_root")));
    }

    #[test]
    fn rejects_empty_attribute_output() {
        let config = BridgeConfig::new("/srv/cms").with_attribute("mail", "");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("attributes[0]")));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = BridgeConfig::from_toml_str("store_root = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"store_root = "/srv/cms""#).unwrap();

        let config = BridgeConfig::load(file.path()).unwrap();
        assert_eq!(config.store_root, "/srv/cms");

        let err = BridgeConfig::load("/nonexistent/bridge.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
