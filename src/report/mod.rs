//! Per-library and batch diff reports.
//!
//! [`compare_library`] runs matching and structural diagnosis for one library
//! and assembles a [`LibraryDiff`]. Every list in the report is sorted, so the
//! serialized JSON is byte-identical for identical inputs regardless of input
//! order.

pub mod aggregate;
pub mod model;

pub use aggregate::{compare_batch, compare_library, compare_outcome, ComparisonSets, LibraryInput};
pub use model::{
    ApiDiffReport, ExcludedTypes, LibraryDiff, LibraryOutcome, MatchedTypePair, Summary,
    TypeReference, UnmatchedType,
};
