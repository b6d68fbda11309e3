use std::path::Path;

use thiserror::Error;

use crate::core::descriptor::ApiMetadata;
use crate::core::types::Side;
use crate::utils::validation::{check_input_size, validate_metadata, ValidationError};

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read metadata: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse metadata: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(#[from] ValidationError),
}

/// Load and validate a metadata document from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// contains inconsistent type descriptors.
pub fn load_metadata(path: &Path, side: Side) -> Result<ApiMetadata, MetadataError> {
    check_input_size(std::fs::metadata(path)?.len())?;
    let content = std::fs::read_to_string(path)?;
    let metadata = parse_metadata(&content, side)?;
    tracing::debug!(
        path = %path.display(),
        %side,
        library = %metadata.library,
        types = metadata.types.len(),
        "loaded metadata"
    );
    Ok(metadata)
}

/// Parse and validate a metadata document
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a type descriptor is
/// inconsistent with its full name.
pub fn parse_metadata(json: &str, side: Side) -> Result<ApiMetadata, MetadataError> {
    let metadata: ApiMetadata = serde_json::from_str(json)?;
    validate_metadata(&metadata, side)?;
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TypeKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REFERENCE_JSON: &str = r#"{
        "library": "widgets",
        "version": "4.8.1",
        "types": [
            {
                "kind": "class",
                "package": "a.b",
                "simple_name": "WidgetImpl",
                "full_name": "a.b.WidgetImpl",
                "modifiers": ["public"],
                "base_type": "java.lang.Object",
                "fields": [
                    {"name": "_count", "member_kind": "field", "declared_type": "int", "modifiers": ["protected"]}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_metadata(REFERENCE_JSON, Side::Reference).unwrap();
        assert_eq!(metadata.library, "widgets");
        assert_eq!(metadata.version.as_deref(), Some("4.8.1"));
        assert_eq!(metadata.types[0].kind, TypeKind::Class);
        assert_eq!(metadata.types[0].fields[0].name, "_count");
    }

    #[test]
    fn test_parse_metadata_rejects_inconsistent_package() {
        let json = r#"{
            "library": "widgets",
            "types": [
                {"kind": "class", "package": "a", "simple_name": "Widget", "full_name": "a.b.Widget"}
            ]
        }"#;
        let err = parse_metadata(json, Side::Reference).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidMetadata(_)));
    }

    #[test]
    fn test_parse_metadata_rejects_malformed_json() {
        let err = parse_metadata("{\"library\": ", Side::Target).unwrap_err();
        assert!(matches!(err, MetadataError::ParseError(_)));
    }

    #[test]
    fn test_load_metadata_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(REFERENCE_JSON.as_bytes()).unwrap();

        let metadata = load_metadata(file.path(), Side::Reference).unwrap();
        assert_eq!(metadata.types.len(), 1);
    }

    #[test]
    fn test_load_metadata_missing_file() {
        let err = load_metadata(Path::new("/nonexistent/metadata.json"), Side::Reference).unwrap_err();
        assert!(matches!(err, MetadataError::ReadError(_)));
    }
}
