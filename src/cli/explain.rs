use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_comparison_config, OutputFormat};
use crate::core::types::Side;
use crate::matching::engine::{MatchExplanation, MatchOutcome, TypeMatcher};
use crate::parsing::metadata::load_metadata;
use crate::report::aggregate::ComparisonSets;

#[derive(Args)]
pub struct ExplainArgs {
    /// Reference metadata JSON
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Target metadata JSON
    #[arg(required = true)]
    pub target: PathBuf,

    /// Reference full name, e.g. `org.example.Outer$Inner`
    #[arg(required = true)]
    pub type_name: String,

    /// Configuration file with namespace mappings, overrides, and well-known types
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ExplainArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let config = load_comparison_config(args.config.as_deref())?;
    let reference = load_metadata(&args.reference, Side::Reference)?;
    let target = load_metadata(&args.target, Side::Target)?;

    let sets = ComparisonSets::new(&reference, &target);
    if sets
        .excluded
        .non_public_reference
        .contains(&args.type_name)
    {
        anyhow::bail!(
            "Type '{}' is not public and is excluded from matching",
            args.type_name
        );
    }

    let matcher = TypeMatcher::new(sets.reference, sets.target, &config);
    let explanation = matcher.explain(&args.type_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Type '{}' not found in {}",
            args.type_name,
            args.reference.display()
        )
    })?;

    match format {
        OutputFormat::Text => print_text_explanation(&explanation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&explanation)?),
        OutputFormat::Tsv => print_tsv_explanation(&explanation),
    }

    Ok(())
}

fn print_text_explanation(explanation: &MatchExplanation) {
    println!("Matching {} {}", explanation.kind, explanation.reference);
    println!("{}", "=".repeat(60));
    println!("  Expected namespace: {}", explanation.expected_namespace);
    println!(
        "  Override: {}",
        explanation.override_target.as_deref().unwrap_or("(none)")
    );
    if explanation.declared_equivalents.is_empty() {
        println!("  Declared equivalents: (none)");
    } else {
        println!(
            "  Declared equivalents: {}",
            explanation.declared_equivalents.join(", ")
        );
    }

    println!("\nHeuristic rules:");
    for rule in &explanation.rules {
        let expected = rule.expected_name.as_deref().unwrap_or("(not applicable)");
        if rule.candidates.is_empty() {
            println!("  {}: {expected}", rule.rule);
        } else {
            println!(
                "  {}: {expected} -> {}",
                rule.rule,
                rule.candidates.join(", ")
            );
        }
    }

    println!("\nOutcome: {}", format_outcome(&explanation.outcome));
}

fn format_outcome(outcome: &MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Matched { target, reason } => format!("matched {target} by {reason}"),
        MatchOutcome::Ambiguous { candidates } => {
            format!("ambiguous between {}", candidates.join(", "))
        }
        MatchOutcome::Unmatched => "unmatched".to_string(),
    }
}

fn print_tsv_explanation(explanation: &MatchExplanation) {
    println!("reference\trule\texpected\tcandidates");
    for rule in &explanation.rules {
        println!(
            "{}\t{}\t{}\t{}",
            explanation.reference,
            rule.rule,
            rule.expected_name.as_deref().unwrap_or(""),
            rule.candidates.join(",")
        );
    }
    println!(
        "{}\toutcome\t\t{}",
        explanation.reference,
        format_outcome(&explanation.outcome)
    );
}
