use crate::core::config::ComparisonConfig;
use crate::core::descriptor::{ApiMetadata, TypeDescriptor};
use crate::core::types::Side;
use crate::matching::diagnosis::{ComparisonError, StructuralDiff};
use crate::matching::engine::{TypeMatcher, UnresolvedType};
use crate::report::model::{
    ApiDiffReport, ExcludedTypes, LibraryDiff, LibraryOutcome, MatchedTypePair, Summary,
    TypeReference, UnmatchedType,
};

/// Both sides of one library, ready to compare
#[derive(Debug, Clone)]
pub struct LibraryInput {
    pub name: String,
    pub reference: ApiMetadata,
    pub target: ApiMetadata,
}

/// The types of one library that take part in matching
#[derive(Debug, Clone)]
pub struct ComparisonSets<'a> {
    pub reference: Vec<&'a TypeDescriptor>,
    pub target: Vec<&'a TypeDescriptor>,
    pub excluded: ExcludedTypes,
}

impl<'a> ComparisonSets<'a> {
    /// Drop non-public reference types and target types without a reference counterpart
    #[must_use]
    pub fn new(reference: &'a ApiMetadata, target: &'a ApiMetadata) -> Self {
        let (reference_set, non_public): (Vec<&TypeDescriptor>, Vec<&TypeDescriptor>) =
            reference.types.iter().partition(|t| t.is_public());
        let (target_set, no_equivalent): (Vec<&TypeDescriptor>, Vec<&TypeDescriptor>) = target
            .types
            .iter()
            .partition(|t| !t.no_reference_equivalent);

        Self {
            reference: reference_set,
            target: target_set,
            excluded: ExcludedTypes {
                non_public_reference: sorted_names(&non_public),
                no_reference_equivalent: sorted_names(&no_equivalent),
            },
        }
    }
}

/// Compare the API surfaces of one library.
///
/// Non-public reference types and target types without a reference
/// counterpart are excluded before matching and listed in
/// [`LibraryDiff::excluded`].
///
/// # Errors
///
/// Returns `ComparisonError::InvariantViolation` if a matched type lacks the
/// `public` modifier.
pub fn compare_library(
    name: &str,
    reference: &ApiMetadata,
    target: &ApiMetadata,
    config: &ComparisonConfig,
) -> Result<LibraryDiff, ComparisonError> {
    let sets = ComparisonSets::new(reference, target);
    let excluded = sets.excluded;
    let matcher = TypeMatcher::new(sets.reference, sets.target, config);
    let matching = matcher.match_all();

    let mut matched = matching
        .matched
        .iter()
        .map(|m| -> Result<MatchedTypePair, ComparisonError> {
            Ok(MatchedTypePair {
                reference: TypeReference::new(m.reference, Side::Reference),
                target: TypeReference::new(m.target, Side::Target),
                reason: m.reason,
                diff: StructuralDiff::analyze(m.reference, m.target, matcher.context())?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    matched.sort_by(|a, b| {
        a.target
            .display_name
            .cmp(&b.target.display_name)
            .then_with(|| a.target.full_name.cmp(&b.target.full_name))
            .then_with(|| a.reference.full_name.cmp(&b.reference.full_name))
    });

    let unmatched_reference = unmatched_entries(&matching.unmatched_reference, Side::Reference);
    let unmatched_target = unmatched_entries(&matching.unmatched_target, Side::Target);

    let summary = Summary::of(
        &matched,
        &unmatched_reference,
        &unmatched_target,
        &excluded,
        &matching.warnings,
    );
    tracing::info!(
        library = name,
        matched = summary.matched,
        with_differences = summary.matched_with_differences,
        unmatched_reference = summary.unmatched_reference,
        unmatched_target = summary.unmatched_target,
        "compared library"
    );

    Ok(LibraryDiff {
        library: name.to_string(),
        reference_version: reference.version.clone(),
        target_version: target.version.clone(),
        summary,
        unmatched_reference,
        unmatched_target,
        matched,
        warnings: matching.warnings,
        excluded,
    })
}

/// Compare every library independently; a failing library is reported, not fatal
#[must_use]
pub fn compare_batch(libraries: &[LibraryInput], config: &ComparisonConfig) -> ApiDiffReport {
    let outcomes = libraries
        .iter()
        .map(|input| compare_outcome(input, config))
        .collect();

    ApiDiffReport::new(outcomes)
}

/// Compare one library of a batch, turning a failure into a report entry
#[must_use]
pub fn compare_outcome(input: &LibraryInput, config: &ComparisonConfig) -> LibraryOutcome {
    match compare_library(&input.name, &input.reference, &input.target, config) {
        Ok(diff) => LibraryOutcome::Compared(diff),
        Err(e) => LibraryOutcome::failed(&input.name, &e),
    }
}

fn unmatched_entries(unresolved: &[UnresolvedType<'_>], side: Side) -> Vec<UnmatchedType> {
    let mut entries: Vec<UnmatchedType> = unresolved
        .iter()
        .map(|u| UnmatchedType {
            descriptor: TypeReference::new(u.descriptor, side),
            ambiguous_candidates: u.ambiguous_candidates.clone(),
        })
        .collect();
    entries.sort_by(|a, b| {
        a.descriptor
            .display_name
            .cmp(&b.descriptor.display_name)
            .then_with(|| a.descriptor.full_name.cmp(&b.descriptor.full_name))
    });
    entries
}

fn sorted_names(types: &[&TypeDescriptor]) -> Vec<String> {
    let mut names: Vec<String> = types.iter().map(|t| t.full_name.clone()).collect();
    names.sort();
    names
}
