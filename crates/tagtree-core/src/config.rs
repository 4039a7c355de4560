//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [parser]
//! trim = true
//!
//! [bindings]
//! strict_properties = true
//!
//! [reconcile]
//! swap_fast_path = true
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TagtreeError};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub bindings: BindingConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    /// Trim whitespace around the whole template source before parsing.
    #[serde(default = "default_trim")]
    pub trim: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BindingConfig {
    /// Reject `.name` holes the element has no property for. When false
    /// they store an expando value instead.
    #[serde(default = "default_strict_properties")]
    pub strict_properties: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Detect a single swapped pair at the range ends and fix it with two
    /// moves.
    #[serde(default = "default_swap_fast_path")]
    pub swap_fast_path: bool,
}

fn default_trim() -> bool {
    true
}

fn default_strict_properties() -> bool {
    true
}

fn default_swap_fast_path() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            trim: default_trim(),
        }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            strict_properties: default_strict_properties(),
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            swap_fast_path: default_swap_fast_path(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TagtreeError::ConfigParseError(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.parser.trim);
        assert!(config.bindings.strict_properties);
        assert!(config.reconcile.swap_fast_path);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str("[reconcile]\nswap_fast_path = false\n").unwrap();
        assert!(!config.reconcile.swap_fast_path);
        assert!(config.bindings.strict_properties);
        assert!(config.parser.trim);
    }

    #[test]
    fn test_invalid_toml_reports_config_error() {
        let err = EngineConfig::from_toml_str("[parser]\ntrim = \"yes\"\n").unwrap_err();
        assert!(matches!(err, TagtreeError::ConfigParseError(_)));
        assert!(err.to_string().starts_with("CONFIG_PARSE_ERROR"));
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tagtree.toml");
        fs::write(&path, "[bindings]\nstrict_properties = false\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert!(!config.bindings.strict_properties);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = EngineConfig::from_file(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, TagtreeError::Io(_)));
    }
}
