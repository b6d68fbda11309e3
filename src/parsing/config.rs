use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::ComparisonConfig;
use crate::utils::validation::{check_input_size, validate_config, ValidationError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),
}

/// Metadata files for one library of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub name: String,
    pub reference: PathBuf,
    pub target: PathBuf,
}

/// Configuration file: comparison settings plus an optional library list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityConfig {
    #[serde(flatten)]
    pub comparison: ComparisonConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<LibraryConfig>,
}

/// Load and validate a configuration file.
///
/// Relative library paths are resolved against the file's directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it fails
/// validation (duplicate overrides, empty mapping prefixes).
pub fn load_config(path: &Path) -> Result<ParityConfig, ConfigError> {
    check_input_size(std::fs::metadata(path)?.len())?;
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;

    if let Some(dir) = path.parent() {
        for library in &mut config.libraries {
            library.reference = dir.join(&library.reference);
            library.target = dir.join(&library.target);
        }
    }

    tracing::debug!(
        path = %path.display(),
        mappings = config.comparison.namespace_mappings.len(),
        overrides = config.comparison.overrides.len(),
        libraries = config.libraries.len(),
        "loaded configuration"
    );
    Ok(config)
}

/// Parse and validate a configuration document
///
/// # Errors
///
/// Returns an error if the JSON is malformed or fails validation.
pub fn parse_config(json: &str) -> Result<ParityConfig, ConfigError> {
    let config: ParityConfig = serde_json::from_str(json)?;
    validate_config(&config.comparison)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_well_known_types;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("{}").unwrap();
        assert!(config.libraries.is_empty());
        assert!(config.comparison.overrides.is_empty());
        assert_eq!(config.comparison.well_known_types, default_well_known_types());
    }

    #[test]
    fn test_parse_config_with_libraries() {
        let json = r#"{
            "namespace_mappings": [{"reference_prefix": "org.example", "target_prefix": "Example"}],
            "overrides": [{"reference": "org.example.FloatField", "target": "Example.SingleField", "justification": "renamed"}],
            "libraries": [{"name": "core", "reference": "core.ref.json", "target": "core.target.json"}]
        }"#;
        let config = parse_config(json).unwrap();
        assert_eq!(config.comparison.namespace_mappings[0].target_prefix, "Example");
        assert_eq!(config.comparison.overrides[0].justification.as_deref(), Some("renamed"));
        assert_eq!(config.libraries[0].name, "core");
    }

    #[test]
    fn test_parse_config_rejects_duplicate_override() {
        let json = r#"{
            "overrides": [
                {"reference": "a.One", "target": "A.Uno"},
                {"reference": "a.One", "target": "A.Ein"}
            ]
        }"#;
        let err = parse_config(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidConfig(ValidationError::DuplicateOverride(_))
        ));
    }

    #[test]
    fn test_parse_config_rejects_empty_prefix() {
        let json = r#"{"namespace_mappings": [{"reference_prefix": "", "target_prefix": "X"}]}"#;
        assert!(matches!(
            parse_config(json).unwrap_err(),
            ConfigError::InvalidConfig(ValidationError::EmptyMappingPrefix(_))
        ));
    }

    #[test]
    fn test_load_config_resolves_library_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parity.json");
        fs::write(
            &path,
            r#"{"libraries": [{"name": "core", "reference": "ref/core.json", "target": "/abs/core.json"}]}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.libraries[0].reference, dir.path().join("ref/core.json"));
        assert_eq!(config.libraries[0].target, PathBuf::from("/abs/core.json"));
    }
}
