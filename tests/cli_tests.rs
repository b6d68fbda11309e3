//! End-to-end tests of the `api-parity` binary against the fixtures in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("api-parity").unwrap()
}

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn json_output(command: &mut Command) -> serde_json::Value {
    let output = command.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("diff"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn test_diff_text() {
    cli()
        .arg("diff")
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("API Parity: widgets"))
        .stdout(predicate::str::contains("Versions: 4.8.1 -> 4.8.0-beta"))
        .stdout(predicate::str::contains("Matched types: 4 (1 with differences)"))
        .stdout(predicate::str::contains(
            "class a.b.Outer.Entry (ambiguous: A.B.Entry, A.B.Outer_Entry)",
        ))
        .stdout(predicate::str::contains("- method public run(int)"))
        .stdout(predicate::str::contains("+ method public run(System.Int64)"));
}

#[test]
fn test_diff_json_with_config() {
    let value = json_output(
        cli()
            .args(["diff", "--format", "json", "--config"])
            .arg(data("parity.json"))
            .arg(data("widgets.reference.json"))
            .arg(data("widgets.target.json")),
    );

    let summary = &value["summary"];
    assert_eq!(summary["matched"], 5);
    assert_eq!(summary["matched_with_differences"], 1);
    assert_eq!(summary["unmatched_reference"], 2);
    assert_eq!(summary["unmatched_target"], 3);
    assert_eq!(summary["ambiguous"], 1);
    assert_eq!(summary["skipped_non_public"], 1);
    assert_eq!(summary["excluded_target"], 1);

    let reasons: Vec<(&str, &str)> = value["matched"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            (
                pair["reference"]["full_name"].as_str().unwrap(),
                pair["reason"]["step"].as_str().unwrap(),
            )
        })
        .collect();
    assert!(reasons.contains(&("a.b.FloatField", "override")));
    assert!(reasons.contains(&("a.b.grouping.Collector$GroupHead", "declared_equivalent")));
    assert!(reasons.contains(&("a.b.WidgetImpl", "heuristic")));

    assert_eq!(value["excluded"]["non_public_reference"][0], "a.b.Hidden");
    assert_eq!(value["excluded"]["no_reference_equivalent"][0], "A.B.Helpers");
}

#[test]
fn test_diff_tsv() {
    cli()
        .args(["diff", "-f", "tsv"])
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "library\tcategory\treference\ttarget\tdetail",
        ))
        .stdout(predicate::str::contains(
            "widgets\tunmatched_reference\ta.b.Lonely\t\t",
        ))
        .stdout(predicate::str::contains(
            "widgets\treference_only_member\ta.b.Gadget\tA.B.Gadget\tmethod public run(int)",
        ));
}

#[test]
fn test_diff_check_fails_on_divergence() {
    cli()
        .args(["diff", "--check"])
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("API divergence found in 'widgets'"));
}

#[test]
fn test_diff_check_passes_for_identical_surfaces() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.json");
    fs::write(
        &target,
        r#"{
            "library": "Widgets",
            "types": [
                {"kind": "class", "namespace": "A.B", "simple_name": "Lonely", "full_name": "A.B.Lonely", "modifiers": ["public"]}
            ]
        }"#,
    )
    .unwrap();
    let reference = temp_dir.path().join("reference.json");
    fs::write(
        &reference,
        r#"{
            "library": "widgets",
            "types": [
                {"kind": "class", "package": "a.b", "simple_name": "Lonely", "full_name": "a.b.Lonely", "modifiers": ["public"]}
            ]
        }"#,
    )
    .unwrap();

    cli()
        .args(["diff", "--check"])
        .arg(&reference)
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched types: 1 (0 with differences)"));
}

#[test]
fn test_diff_missing_file() {
    cli()
        .arg("diff")
        .arg("nonexistent.json")
        .arg(data("widgets.target.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read metadata"));
}

#[test]
fn test_diff_rejects_inconsistent_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let reference = temp_dir.path().join("reference.json");
    fs::write(
        &reference,
        r#"{
            "library": "widgets",
            "types": [
                {"kind": "class", "package": "a", "simple_name": "Widget", "full_name": "a.b.Widget"}
            ]
        }"#,
    )
    .unwrap();

    cli()
        .arg("diff")
        .arg(&reference)
        .arg(data("widgets.target.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid metadata"));
}

#[test]
fn test_duplicate_override_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("parity.json");
    fs::write(
        &config,
        r#"{
            "overrides": [
                {"reference": "a.b.FloatField", "target": "A.B.SingleField"},
                {"reference": "a.b.FloatField", "target": "A.B.Extra"}
            ]
        }"#,
    )
    .unwrap();

    cli()
        .args(["diff", "--config"])
        .arg(&config)
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "More than one override for reference type 'a.b.FloatField'",
        ));
}

#[test]
fn test_override_warning_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("parity.json");
    fs::write(
        &config,
        r#"{"overrides": [{"reference": "a.b.Missing", "target": "A.B.Extra"}]}"#,
    )
    .unwrap();

    let value = json_output(
        cli()
            .args(["diff", "--format", "json", "--config"])
            .arg(&config)
            .arg(data("widgets.reference.json"))
            .arg(data("widgets.target.json")),
    );
    assert_eq!(value["summary"]["warnings"], 1);
    assert_eq!(
        value["warnings"][0]["warning"],
        "override_reference_not_found"
    );
}

#[test]
fn test_batch_text_reports_failed_library() {
    cli()
        .arg("batch")
        .arg(data("parity.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("API Parity: broken"))
        .stdout(predicate::str::contains("FAILED: Failed to read metadata"))
        .stdout(predicate::str::contains("API Parity: widgets"))
        .stdout(predicate::str::contains("Failed libraries: 1"));
}

#[test]
fn test_batch_json_orders_libraries() {
    let value = json_output(
        cli()
            .args(["batch", "--format", "json"])
            .arg(data("parity.json")),
    );

    let libraries = value["libraries"].as_array().unwrap();
    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[0]["library"], "broken");
    assert_eq!(libraries[0]["status"], "failed");
    assert_eq!(libraries[1]["library"], "widgets");
    assert_eq!(libraries[1]["status"], "compared");
    assert_eq!(value["failed"], 1);
    assert_eq!(value["totals"]["matched"], 5);
}

#[test]
fn test_batch_library_filter_and_check() {
    cli()
        .args(["batch", "--library", "widgets", "--check"])
        .arg(data("parity.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("API Parity: widgets"))
        .stdout(predicate::str::contains("broken").not())
        .stderr(predicate::str::contains("API divergence found (0 libraries failed)"));
}

#[test]
fn test_batch_without_libraries() {
    cli()
        .args(["batch", "--library", "nothing"])
        .arg(data("parity.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No libraries to compare"));
}

#[test]
fn test_explain_ambiguous_type() {
    cli()
        .arg("explain")
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .arg("a.b.Outer$Entry")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching class a.b.Outer$Entry"))
        .stdout(predicate::str::contains("Expected namespace: A.B"))
        .stdout(predicate::str::contains(
            "Outcome: ambiguous between A.B.Entry, A.B.Outer_Entry",
        ));
}

#[test]
fn test_explain_json_override() {
    let value = json_output(
        cli()
            .args(["explain", "-f", "json", "-c"])
            .arg(data("parity.json"))
            .arg(data("widgets.reference.json"))
            .arg(data("widgets.target.json"))
            .arg("a.b.FloatField"),
    );
    assert_eq!(value["override_target"], "A.B.SingleField");
    assert_eq!(value["outcome"]["result"], "matched");
    assert_eq!(value["outcome"]["target"], "A.B.SingleField");
}

#[test]
fn test_explain_rejects_non_public_and_unknown_types() {
    cli()
        .arg("explain")
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .arg("a.b.Hidden")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not public"));

    cli()
        .arg("explain")
        .arg(data("widgets.reference.json"))
        .arg(data("widgets.target.json"))
        .arg("a.b.Nowhere")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
