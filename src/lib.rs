//! # api-parity
//!
//! A library for tracking API divergence between a reference library and a
//! port of it to another ecosystem.
//!
//! A port rarely keeps every name intact. The reference side writes
//! `org.example.search.WidgetImpl` where the port has `Org.Example.Search.Widget`,
//! interfaces gain an `I` prefix, nested types get flattened, and generic types
//! carry an arity marker. `api-parity` undoes these conventions to pair every
//! public reference type with its target counterpart, then reports structural
//! differences between the pairs.
//!
//! ## Features
//!
//! - **Explainable matching**: every pair records the step that produced it
//! - **Overrides**: explicit pairings for one-off renames always win
//! - **Ambiguity detection**: several equally good candidates are reported, never guessed
//! - **Modifier equivalence**: `final` vs `sealed`, `readonly`, package-private vs `internal`
//! - **Member comparison**: fields, properties, methods, and constructors
//! - **Deterministic reports**: identical inputs give byte-identical JSON
//!
//! ## Example
//!
//! ```rust
//! use api_parity::core::{ApiMetadata, ComparisonConfig, Side, TypeDescriptor, TypeKind};
//! use api_parity::report::compare_library;
//!
//! let reference = ApiMetadata::new(
//!     "widgets",
//!     vec![TypeDescriptor::new(Side::Reference, TypeKind::Class, "a.b.WidgetImpl")],
//! );
//! let target = ApiMetadata::new(
//!     "Widgets",
//!     vec![TypeDescriptor::new(Side::Target, TypeKind::Class, "A.B.Widget")],
//! );
//!
//! let diff = compare_library("widgets", &reference, &target, &ComparisonConfig::default()).unwrap();
//! assert_eq!(diff.summary.matched, 1);
//! assert!(!diff.summary.has_divergence());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Type and member descriptors, configuration
//! - [`matching`]: Naming rules, type matching, structural comparison
//! - [`report`]: Per-library and batch reports
//! - [`parsing`]: Metadata and configuration loaders
//! - [`utils`]: Input validation
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::config::ComparisonConfig;
pub use crate::core::descriptor::{ApiMetadata, MemberDescriptor, TypeDescriptor};
pub use crate::core::types::*;
pub use matching::engine::{match_types, TypeMatcher, TypeMatching};
pub use report::aggregate::{compare_batch, compare_library};
pub use report::model::{ApiDiffReport, LibraryDiff};
