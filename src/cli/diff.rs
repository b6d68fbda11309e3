use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_comparison_config, OutputFormat};
use crate::core::types::Side;
use crate::matching::members::MemberReference;
use crate::parsing::metadata::load_metadata;
use crate::report::aggregate::compare_library;
use crate::report::model::{LibraryDiff, MatchedTypePair, UnmatchedType};

#[derive(Args)]
pub struct DiffArgs {
    /// Reference metadata JSON
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Target metadata JSON
    #[arg(required = true)]
    pub target: PathBuf,

    /// Configuration file with namespace mappings, overrides, and well-known types
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Library name for the report (defaults to the reference metadata's library)
    #[arg(long)]
    pub library: Option<String>,

    /// Exit with an error if the library diverges
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: DiffArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = load_comparison_config(args.config.as_deref())?;
    let reference = load_metadata(&args.reference, Side::Reference)?;
    let target = load_metadata(&args.target, Side::Target)?;

    if verbose {
        eprintln!(
            "Reference: {} ({} types), target: {} ({} types)",
            reference.library,
            reference.types.len(),
            target.library,
            target.types.len()
        );
    }

    let name = args.library.unwrap_or_else(|| reference.library.clone());
    let diff = compare_library(&name, &reference, &target, &config)?;

    match format {
        OutputFormat::Text => print_text_diff(&diff),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Tsv => {
            println!("{TSV_HEADER}");
            print_tsv_rows(&diff);
        }
    }

    if args.check && diff.summary.has_divergence() {
        anyhow::bail!("API divergence found in '{name}'");
    }
    Ok(())
}

pub(crate) const TSV_HEADER: &str = "library\tcategory\treference\ttarget\tdetail";

pub(crate) fn print_text_diff(diff: &LibraryDiff) {
    let summary = &diff.summary;

    println!("API Parity: {}", diff.library);
    println!("{}", "=".repeat(60));
    if diff.reference_version.is_some() || diff.target_version.is_some() {
        println!(
            "Versions: {} -> {}",
            diff.reference_version.as_deref().unwrap_or("?"),
            diff.target_version.as_deref().unwrap_or("?")
        );
    }

    println!("\nSummary:");
    println!(
        "  Matched types: {} ({} with differences)",
        summary.matched, summary.matched_with_differences
    );
    println!(
        "  Unmatched reference types: {} ({} ambiguous)",
        summary.unmatched_reference, summary.ambiguous
    );
    println!("  Unmatched target types: {}", summary.unmatched_target);
    println!(
        "  Members: {} reference only, {} target only, {} type mismatches",
        summary.reference_only_members, summary.target_only_members, summary.declared_type_mismatches
    );
    println!(
        "  Excluded: {} non-public reference, {} without reference equivalent",
        summary.skipped_non_public, summary.excluded_target
    );

    print_text_unmatched("Unmatched reference types", &diff.unmatched_reference);
    print_text_unmatched("Unmatched target types", &diff.unmatched_target);

    let divergent: Vec<&MatchedTypePair> =
        diff.matched.iter().filter(|m| !m.diff.is_clean()).collect();
    if !divergent.is_empty() {
        println!("\nMatched types with differences:");
        for pair in divergent {
            print_text_pair(pair);
        }
    }

    if !diff.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &diff.warnings {
            println!("  {warning}");
        }
    }
}

fn print_text_unmatched(title: &str, entries: &[UnmatchedType]) {
    if entries.is_empty() {
        return;
    }
    println!("\n{title}:");
    for entry in entries {
        let descriptor = &entry.descriptor;
        if entry.ambiguous_candidates.is_empty() {
            println!("  {} {}", descriptor.kind, descriptor.display_name);
        } else {
            println!(
                "  {} {} (ambiguous: {})",
                descriptor.kind,
                descriptor.display_name,
                entry.ambiguous_candidates.join(", ")
            );
        }
    }
}

fn print_text_pair(pair: &MatchedTypePair) {
    let diff = &pair.diff;
    println!(
        "  {} -> {} [{}]",
        pair.reference.display_name, pair.target.display_name, pair.reason
    );

    if let Some(modifiers) = &diff.modifiers {
        println!(
            "    modifiers: {} vs {}",
            modifiers.reference.join(" "),
            modifiers.target.join(" ")
        );
    }
    if let Some(base_type) = &diff.base_type {
        println!(
            "    base type: {} vs {}",
            base_type.reference.as_deref().unwrap_or("(none)"),
            base_type.target.as_deref().unwrap_or("(none)")
        );
    }
    if let Some(contracts) = &diff.contracts {
        for contract in &contracts.reference_only {
            println!("    - contract {contract}");
        }
        for contract in &contracts.target_only {
            println!("    + contract {contract}");
        }
    }
    for member in &diff.members.reference_only {
        println!("    - {}", format_member(member));
    }
    for member in &diff.members.target_only {
        println!("    + {}", format_member(member));
    }
    for mismatch in &diff.members.declared_type_mismatches {
        println!(
            "    ~ {} {}: {} vs {}",
            mismatch.member_kind, mismatch.reference_name, mismatch.reference_type, mismatch.target_type
        );
    }
}

fn format_member(member: &MemberReference) -> String {
    if member.modifiers.is_empty() {
        format!("{} {}", member.member_kind, member.signature)
    } else {
        format!(
            "{} {} {}",
            member.member_kind,
            member.modifiers.join(" "),
            member.signature
        )
    }
}

/// One row per finding; clean matched pairs produce no rows
pub(crate) fn print_tsv_rows(diff: &LibraryDiff) {
    let library = &diff.library;

    for entry in &diff.unmatched_reference {
        println!(
            "{library}\tunmatched_reference\t{}\t\t{}",
            entry.descriptor.full_name,
            entry.ambiguous_candidates.join(",")
        );
    }
    for entry in &diff.unmatched_target {
        println!(
            "{library}\tunmatched_target\t\t{}\t{}",
            entry.descriptor.full_name,
            entry.ambiguous_candidates.join(",")
        );
    }

    for pair in &diff.matched {
        let reference = &pair.reference.full_name;
        let target = &pair.target.full_name;
        let structural = &pair.diff;

        if let Some(modifiers) = &structural.modifiers {
            println!(
                "{library}\tmodifiers\t{reference}\t{target}\t{} vs {}",
                modifiers.reference.join(" "),
                modifiers.target.join(" ")
            );
        }
        if let Some(base_type) = &structural.base_type {
            println!(
                "{library}\tbase_type\t{reference}\t{target}\t{} vs {}",
                base_type.reference.as_deref().unwrap_or(""),
                base_type.target.as_deref().unwrap_or("")
            );
        }
        if let Some(contracts) = &structural.contracts {
            for contract in &contracts.reference_only {
                println!("{library}\treference_only_contract\t{reference}\t{target}\t{contract}");
            }
            for contract in &contracts.target_only {
                println!("{library}\ttarget_only_contract\t{reference}\t{target}\t{contract}");
            }
        }
        for member in &structural.members.reference_only {
            println!(
                "{library}\treference_only_member\t{reference}\t{target}\t{}",
                format_member(member)
            );
        }
        for member in &structural.members.target_only {
            println!(
                "{library}\ttarget_only_member\t{reference}\t{target}\t{}",
                format_member(member)
            );
        }
        for mismatch in &structural.members.declared_type_mismatches {
            println!(
                "{library}\tdeclared_type\t{reference}\t{target}\t{} {}: {} vs {}",
                mismatch.member_kind,
                mismatch.reference_name,
                mismatch.reference_type,
                mismatch.target_type
            );
        }
    }
}
