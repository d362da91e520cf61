//! Engine configuration
//!
//! Loaded from YAML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```yaml
//! consistency: ordered      # or: unordered
//! enforce_max_labels: true
//! ```

use crate::analytics::consistency::{OrderSensitive, SequenceEquality, SetBased};
use crate::labeling::LabelingResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How two label sequences for the same instance are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMode {
    /// Same labels in the same order
    #[default]
    Ordered,
    /// Same set of labels, order ignored
    Unordered,
}

impl ConsistencyMode {
    pub fn strategy(&self) -> &'static dyn SequenceEquality {
        match self {
            Self::Ordered => &OrderSensitive,
            Self::Unordered => &SetBased,
        }
    }
}

/// Configuration for a [`crate::LabelingEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sequence comparison used for consistency in reports
    pub consistency: ConsistencyMode,
    /// Reject assignments carrying more labels than the dataset allows
    pub enforce_max_labels: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            consistency: ConsistencyMode::Ordered,
            enforce_max_labels: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> LabelingResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration file
    pub fn from_path<P>(path: P) -> LabelingResult<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::LabelingError;
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_parse_unordered() {
        let config = EngineConfig::from_yaml_str("consistency: unordered\n").unwrap();
        assert_eq!(config.consistency, ConsistencyMode::Unordered);
        assert!(config.enforce_max_labels);
    }

    #[test]
    fn test_invalid_mode_is_config_error() {
        let err = EngineConfig::from_yaml_str("consistency: sometimes\n").unwrap_err();
        assert!(matches!(err, LabelingError::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enforce_max_labels: false").unwrap();

        let config = EngineConfig::from_path(file.path()).unwrap();
        assert!(!config.enforce_max_labels);
        assert_eq!(config.consistency, ConsistencyMode::Ordered);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, LabelingError::Io(_)));
    }

    #[test]
    fn test_mode_selects_strategy() {
        let a = vec!["x".to_string(), "y".to_string()];
        let b = vec!["y".to_string(), "x".to_string()];
        assert!(!ConsistencyMode::Ordered.strategy().equal(&a, &b));
        assert!(ConsistencyMode::Unordered.strategy().equal(&a, &b));
    }
}
