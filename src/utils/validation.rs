//! Structural validation of loaded metadata and configuration.

use std::collections::BTreeSet;

use crate::core::config::ComparisonConfig;
use crate::core::descriptor::{package_of, ApiMetadata, TypeDescriptor};
use crate::core::types::Side;

/// Maximum number of types accepted from one metadata document (DOS protection)
pub const MAX_TYPES: usize = 200_000;

/// Maximum number of members accepted on a single type (DOS protection)
pub const MAX_MEMBERS_PER_TYPE: usize = 50_000;

/// Maximum size of a metadata or configuration file read from disk
pub const MAX_INPUT_BYTES: u64 = 512 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Type with an empty full name")]
    EmptyFullName,
    #[error("Type '{full_name}' declares package '{package}', but its full name implies '{expected}'")]
    PackageMismatch {
        full_name: String,
        package: String,
        expected: String,
    },
    #[error("Type '{full_name}' declares simple name '{simple_name}', which does not end its full name")]
    SimpleNameMismatch {
        full_name: String,
        simple_name: String,
    },
    #[error("Duplicate type '{0}'")]
    DuplicateType(String),
    #[error("Too many types: {0} exceeds maximum of {MAX_TYPES}")]
    TooManyTypes(usize),
    #[error("Type '{0}' has too many members: exceeds maximum of {MAX_MEMBERS_PER_TYPE}")]
    TooManyMembers(String),
    #[error("More than one override for reference type '{0}'")]
    DuplicateOverride(String),
    #[error("Namespace mapping to '{0}' has an empty reference prefix")]
    EmptyMappingPrefix(String),
    #[error("Input file too large: {0} bytes exceeds maximum of {MAX_INPUT_BYTES}")]
    InputTooLarge(u64),
}

/// Check that a descriptor's name parts agree with its full name on `side`.
///
/// # Errors
///
/// Returns the first inconsistency found.
pub fn validate_type_descriptor(
    descriptor: &TypeDescriptor,
    side: Side,
) -> Result<(), ValidationError> {
    if descriptor.full_name.trim().is_empty() {
        return Err(ValidationError::EmptyFullName);
    }

    let expected = package_of(&descriptor.full_name, side);
    if descriptor.package != expected {
        return Err(ValidationError::PackageMismatch {
            full_name: descriptor.full_name.clone(),
            package: descriptor.package.clone(),
            expected: expected.to_string(),
        });
    }

    if descriptor.simple_name.is_empty() || !descriptor.full_name.ends_with(&descriptor.simple_name) {
        return Err(ValidationError::SimpleNameMismatch {
            full_name: descriptor.full_name.clone(),
            simple_name: descriptor.simple_name.clone(),
        });
    }

    if descriptor.members().count() > MAX_MEMBERS_PER_TYPE {
        return Err(ValidationError::TooManyMembers(descriptor.full_name.clone()));
    }

    Ok(())
}

/// Validate every type of a metadata document and require unique full names.
///
/// # Errors
///
/// Returns the first invalid type, a duplicate full name, or
/// `ValidationError::TooManyTypes`.
pub fn validate_metadata(metadata: &ApiMetadata, side: Side) -> Result<(), ValidationError> {
    if metadata.types.len() > MAX_TYPES {
        return Err(ValidationError::TooManyTypes(metadata.types.len()));
    }

    let mut seen = BTreeSet::new();
    for descriptor in &metadata.types {
        validate_type_descriptor(descriptor, side)?;
        if !seen.insert(descriptor.full_name.as_str()) {
            return Err(ValidationError::DuplicateType(descriptor.full_name.clone()));
        }
    }
    Ok(())
}

/// Reject configurations the matching engine cannot apply unambiguously.
///
/// # Errors
///
/// Returns `ValidationError::DuplicateOverride` when one reference type has
/// several overrides, `ValidationError::EmptyMappingPrefix` for a mapping
/// that would match every package.
pub fn validate_config(config: &ComparisonConfig) -> Result<(), ValidationError> {
    if let Some(mapping) = config
        .namespace_mappings
        .iter()
        .find(|m| m.reference_prefix.trim().is_empty())
    {
        return Err(ValidationError::EmptyMappingPrefix(mapping.target_prefix.clone()));
    }

    let mut seen = BTreeSet::new();
    for type_override in &config.overrides {
        if !seen.insert(type_override.reference.as_str()) {
            return Err(ValidationError::DuplicateOverride(type_override.reference.clone()));
        }
    }
    Ok(())
}

/// Check a file size against [`MAX_INPUT_BYTES`] before reading it.
///
/// # Errors
///
/// Returns `ValidationError::InputTooLarge` when the limit is exceeded.
pub fn check_input_size(len: u64) -> Result<(), ValidationError> {
    if len > MAX_INPUT_BYTES {
        return Err(ValidationError::InputTooLarge(len));
    }
    Ok(())
}
