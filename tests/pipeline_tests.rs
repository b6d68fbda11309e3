//! Library-level comparison of the fixture metadata in `tests/data`.

use std::path::PathBuf;

use api_parity::parsing::{load_config, load_metadata};
use api_parity::report::{compare_outcome, LibraryInput, LibraryOutcome};
use api_parity::{compare_library, HeuristicRule, MatchReason, Side};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn fixtures() -> (api_parity::ApiMetadata, api_parity::ApiMetadata) {
    let reference = load_metadata(&data("widgets.reference.json"), Side::Reference).unwrap();
    let target = load_metadata(&data("widgets.target.json"), Side::Target).unwrap();
    (reference, target)
}

#[test]
fn test_fixture_diff_with_configuration() {
    let (reference, target) = fixtures();
    let config = load_config(&data("parity.json")).unwrap();
    let diff = compare_library("widgets", &reference, &target, &config.comparison).unwrap();

    // Matched pairs are ordered by target display name
    let pairs: Vec<(&str, &str, MatchReason)> = diff
        .matched
        .iter()
        .map(|p| (p.reference.full_name.as_str(), p.target.full_name.as_str(), p.reason))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("a.b.Gadget", "A.B.Gadget", MatchReason::Heuristic { rule: HeuristicRule::ExactName }),
            (
                "a.b.grouping.Collector$GroupHead",
                "A.B.Grouping.Collector_GroupHead",
                MatchReason::DeclaredEquivalent
            ),
            ("a.b.Thing", "A.B.IThing", MatchReason::Heuristic { rule: HeuristicRule::ExactName }),
            ("a.b.FloatField", "A.B.SingleField", MatchReason::Override),
            (
                "a.b.WidgetImpl",
                "A.B.Widget",
                MatchReason::Heuristic { rule: HeuristicRule::ImplementationSuffix }
            ),
        ]
    );

    let divergent: Vec<&str> = diff
        .matched
        .iter()
        .filter(|p| !p.diff.is_clean())
        .map(|p| p.reference.full_name.as_str())
        .collect();
    assert_eq!(divergent, vec!["a.b.Gadget"]);

    let unmatched_reference: Vec<&str> = diff
        .unmatched_reference
        .iter()
        .map(|u| u.descriptor.full_name.as_str())
        .collect();
    assert_eq!(unmatched_reference, vec!["a.b.Lonely", "a.b.Outer$Entry"]);
    assert_eq!(
        diff.unmatched_reference[1].ambiguous_candidates,
        vec!["A.B.Entry", "A.B.Outer_Entry"]
    );

    // Candidates of an ambiguous match stay unmatched and point back at the reference
    let entry = diff
        .unmatched_target
        .iter()
        .find(|u| u.descriptor.full_name == "A.B.Entry")
        .unwrap();
    assert_eq!(entry.ambiguous_candidates, vec!["a.b.Outer$Entry"]);

    assert_eq!(diff.summary.reference_types, 7);
    assert_eq!(diff.summary.target_types, 8);
    assert!(diff.warnings.is_empty());
}

#[test]
fn test_fixture_partition_covers_every_public_type() {
    let (reference, target) = fixtures();
    let diff = compare_library("widgets", &reference, &target, &Default::default()).unwrap();

    let compared_reference = reference.types.len() - diff.excluded.non_public_reference.len();
    let compared_target = target.types.len() - diff.excluded.no_reference_equivalent.len();
    assert_eq!(
        diff.matched.len() + diff.unmatched_reference.len(),
        compared_reference
    );
    assert_eq!(diff.matched.len() + diff.unmatched_target.len(), compared_target);
}

#[test]
fn test_fixture_report_is_reproducible() {
    let (reference, target) = fixtures();
    let config = load_config(&data("parity.json")).unwrap();

    let mut shuffled_reference = reference.clone();
    shuffled_reference.types.reverse();
    let mut shuffled_target = target.clone();
    shuffled_target.types.rotate_left(3);

    let first = compare_library("widgets", &reference, &target, &config.comparison).unwrap();
    let second =
        compare_library("widgets", &shuffled_reference, &shuffled_target, &config.comparison)
            .unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_fixture_outcome_carries_versions() {
    let (reference, target) = fixtures();
    let outcome = compare_outcome(
        &LibraryInput {
            name: "widgets".to_string(),
            reference,
            target,
        },
        &Default::default(),
    );

    let LibraryOutcome::Compared(diff) = outcome else {
        panic!("fixture comparison failed");
    };
    assert_eq!(diff.reference_version.as_deref(), Some("4.8.1"));
    assert_eq!(diff.target_version.as_deref(), Some("4.8.0-beta"));
}
