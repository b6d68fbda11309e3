use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::core::descriptor::TypeDescriptor;
use crate::core::types::{MatchReason, Side, TypeKind};
use crate::matching::diagnosis::StructuralDiff;
use crate::matching::engine::ConfigWarning;
use crate::matching::modifiers::sort_modifiers;

/// A type as shown in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReference {
    pub kind: TypeKind,
    pub full_name: String,
    pub display_name: String,
    /// Sorted by the side's display precedence
    pub modifiers: Vec<String>,
}

impl TypeReference {
    #[must_use]
    pub fn new(descriptor: &TypeDescriptor, side: Side) -> Self {
        Self {
            kind: descriptor.kind,
            full_name: descriptor.full_name.clone(),
            display_name: descriptor.display_name(side),
            modifiers: sort_modifiers(side, &descriptor.modifiers),
        }
    }
}

/// A type with no counterpart on the other side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedType {
    #[serde(flatten)]
    pub descriptor: TypeReference,

    /// Other-side full names involved in an ambiguous match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguous_candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedTypePair {
    pub reference: TypeReference,
    pub target: TypeReference,
    pub reason: MatchReason,
    pub diff: StructuralDiff,
}

/// Types removed from the comparison sets before matching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedTypes {
    /// Reference types without the public modifier
    pub non_public_reference: Vec<String>,
    /// Target types marked as having no reference counterpart
    pub no_reference_equivalent: Vec<String>,
}

/// Counts derived from a [`LibraryDiff`]; never stored independently of it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub reference_types: usize,
    pub target_types: usize,
    pub matched: usize,
    pub matched_with_differences: usize,
    pub unmatched_reference: usize,
    pub unmatched_target: usize,
    pub ambiguous: usize,
    pub reference_only_members: usize,
    pub target_only_members: usize,
    pub declared_type_mismatches: usize,
    pub skipped_non_public: usize,
    pub excluded_target: usize,
    pub warnings: usize,
}

impl Summary {
    /// Reduce the lists of a library diff to counts
    #[must_use]
    pub fn of(
        matched: &[MatchedTypePair],
        unmatched_reference: &[UnmatchedType],
        unmatched_target: &[UnmatchedType],
        excluded: &ExcludedTypes,
        warnings: &[ConfigWarning],
    ) -> Self {
        Self {
            reference_types: matched.len() + unmatched_reference.len(),
            target_types: matched.len() + unmatched_target.len(),
            matched: matched.len(),
            matched_with_differences: matched.iter().filter(|m| !m.diff.is_clean()).count(),
            unmatched_reference: unmatched_reference.len(),
            unmatched_target: unmatched_target.len(),
            ambiguous: unmatched_reference
                .iter()
                .filter(|u| !u.ambiguous_candidates.is_empty())
                .count(),
            reference_only_members: matched.iter().map(|m| m.diff.members.reference_only.len()).sum(),
            target_only_members: matched.iter().map(|m| m.diff.members.target_only.len()).sum(),
            declared_type_mismatches: matched
                .iter()
                .map(|m| m.diff.members.declared_type_mismatches.len())
                .sum(),
            skipped_non_public: excluded.non_public_reference.len(),
            excluded_target: excluded.no_reference_equivalent.len(),
            warnings: warnings.len(),
        }
    }

    /// Anything left to port or reconcile
    #[must_use]
    pub fn has_divergence(&self) -> bool {
        self.matched_with_differences > 0 || self.unmatched_reference > 0 || self.unmatched_target > 0
    }
}

impl Add for Summary {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            reference_types: self.reference_types + other.reference_types,
            target_types: self.target_types + other.target_types,
            matched: self.matched + other.matched,
            matched_with_differences: self.matched_with_differences + other.matched_with_differences,
            unmatched_reference: self.unmatched_reference + other.unmatched_reference,
            unmatched_target: self.unmatched_target + other.unmatched_target,
            ambiguous: self.ambiguous + other.ambiguous,
            reference_only_members: self.reference_only_members + other.reference_only_members,
            target_only_members: self.target_only_members + other.target_only_members,
            declared_type_mismatches: self.declared_type_mismatches + other.declared_type_mismatches,
            skipped_non_public: self.skipped_non_public + other.skipped_non_public,
            excluded_target: self.excluded_target + other.excluded_target,
            warnings: self.warnings + other.warnings,
        }
    }
}

impl Sum for Summary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Complete comparison of one library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDiff {
    pub library: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,
    pub summary: Summary,
    pub unmatched_reference: Vec<UnmatchedType>,
    pub unmatched_target: Vec<UnmatchedType>,
    pub matched: Vec<MatchedTypePair>,
    pub warnings: Vec<ConfigWarning>,
    pub excluded: ExcludedTypes,
}

/// Result for one library of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LibraryOutcome {
    Compared(LibraryDiff),
    Failed { library: String, error: String },
}

impl LibraryOutcome {
    /// Record a library that could not be compared
    pub fn failed(library: &str, error: &dyn std::fmt::Display) -> Self {
        tracing::warn!(library, "comparison failed: {error}");
        Self::Failed {
            library: library.to_string(),
            error: error.to_string(),
        }
    }

    #[must_use]
    pub fn library(&self) -> &str {
        match self {
            Self::Compared(diff) => &diff.library,
            Self::Failed { library, .. } => library,
        }
    }
}

/// Comparison of several libraries with totals over the successful ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDiffReport {
    pub libraries: Vec<LibraryOutcome>,
    pub totals: Summary,
    pub failed: usize,
}

impl ApiDiffReport {
    /// Assemble a report; libraries are ordered by name
    #[must_use]
    pub fn new(mut libraries: Vec<LibraryOutcome>) -> Self {
        libraries.sort_by(|a, b| a.library().cmp(b.library()));
        let totals = libraries
            .iter()
            .filter_map(|outcome| match outcome {
                LibraryOutcome::Compared(diff) => Some(diff.summary),
                LibraryOutcome::Failed { .. } => None,
            })
            .sum();
        let failed = libraries
            .iter()
            .filter(|outcome| matches!(outcome, LibraryOutcome::Failed { .. }))
            .count();

        Self {
            libraries,
            totals,
            failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(matched: usize, unmatched_reference: usize) -> Summary {
        Summary {
            reference_types: matched + unmatched_reference,
            target_types: matched,
            matched,
            unmatched_reference,
            ..Summary::default()
        }
    }

    fn diff(library: &str, summary: Summary) -> LibraryDiff {
        LibraryDiff {
            library: library.to_string(),
            reference_version: None,
            target_version: None,
            summary,
            unmatched_reference: Vec::new(),
            unmatched_target: Vec::new(),
            matched: Vec::new(),
            warnings: Vec::new(),
            excluded: ExcludedTypes::default(),
        }
    }

    #[test]
    fn test_summary_sum() {
        let total: Summary = [summary(2, 1), summary(3, 0)].into_iter().sum();
        assert_eq!(total.matched, 5);
        assert_eq!(total.unmatched_reference, 1);
        assert_eq!(total.reference_types, 6);
    }

    #[test]
    fn test_has_divergence() {
        assert!(!summary(2, 0).has_divergence());
        assert!(summary(2, 1).has_divergence());
    }

    #[test]
    fn test_report_sorts_libraries_and_skips_failures_in_totals() {
        let report = ApiDiffReport::new(vec![
            LibraryOutcome::Compared(diff("search", summary(4, 1))),
            LibraryOutcome::Failed {
                library: "analysis".to_string(),
                error: "boom".to_string(),
            },
            LibraryOutcome::Compared(diff("core", summary(1, 0))),
        ]);

        let names: Vec<_> = report.libraries.iter().map(LibraryOutcome::library).collect();
        assert_eq!(names, vec!["analysis", "core", "search"]);
        assert_eq!(report.totals.matched, 5);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let failed = LibraryOutcome::Failed {
            library: "core".to_string(),
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["library"], "core");

        let compared = serde_json::to_value(LibraryOutcome::Compared(diff("core", summary(1, 0)))).unwrap();
        assert_eq!(compared["status"], "compared");
        assert_eq!(compared["summary"]["matched"], 1);
    }
}
