//! Core data types for API parity checking.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`TypeDescriptor`]: One declared type on either side, with its members
//! - [`MemberDescriptor`]: A field, property, method, or constructor
//! - [`ApiMetadata`]: The extracted API surface of one library
//! - [`ComparisonConfig`]: Namespace mappings, overrides, and well-known types
//! - [`Side`], [`TypeKind`], [`MemberKind`], [`MatchReason`]: Classification types
//!
//! ## Naming Conventions
//!
//! The two sides spell the same declaration differently:
//!
//! | Concept | Reference | Target |
//! |---------|-----------|--------|
//! | Package | `org.example.search` | `Org.Example.Search` |
//! | Nested type | `Outer$Inner` | `Outer+Inner` |
//! | Interface | `Thing` | `IThing` |
//! | Implementation | `WidgetImpl` | `Widget` |
//! | Generic type | `List` | ``List`1`` |
//!
//! Matching never mutates descriptors; both sides are read-only inputs.

pub mod config;
pub mod descriptor;
pub mod types;

pub use config::{ComparisonConfig, NamespaceMapping, TypeOverride, WellKnownType};
pub use descriptor::{ApiMetadata, MemberDescriptor, MemberDetail, TypeDescriptor};
pub use types::{HeuristicRule, MatchReason, MemberKind, Side, TypeKind};
