use std::path::PathBuf;

use clap::Args;

use crate::cli::diff::{print_text_diff, print_tsv_rows, TSV_HEADER};
use crate::cli::OutputFormat;
use crate::core::config::ComparisonConfig;
use crate::core::types::Side;
use crate::parsing::config::{load_config, LibraryConfig};
use crate::parsing::metadata::load_metadata;
use crate::report::aggregate::{compare_outcome, LibraryInput};
use crate::report::model::{ApiDiffReport, LibraryOutcome, Summary};

#[derive(Args)]
pub struct BatchArgs {
    /// Configuration file listing the libraries to compare
    #[arg(required = true)]
    pub config: PathBuf,

    /// Only compare the named libraries (may be repeated)
    #[arg(short, long = "library")]
    pub libraries: Vec<String>,

    /// Exit with an error if any library diverges or fails
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: BatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;

    let selected: Vec<&LibraryConfig> = config
        .libraries
        .iter()
        .filter(|l| args.libraries.is_empty() || args.libraries.contains(&l.name))
        .collect();
    if selected.is_empty() {
        anyhow::bail!(
            "No libraries to compare in '{}'",
            args.config.display()
        );
    }

    let outcomes = selected
        .into_iter()
        .map(|library| {
            if verbose {
                eprintln!("Comparing {}...", library.name);
            }
            compare_configured(library, &config.comparison)
        })
        .collect();
    let report = ApiDiffReport::new(outcomes);

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    if args.check && (report.failed > 0 || report.totals.has_divergence()) {
        anyhow::bail!(
            "API divergence found ({} libraries failed)",
            report.failed
        );
    }
    Ok(())
}

/// Load and compare one configured library; load errors become failed entries
fn compare_configured(library: &LibraryConfig, config: &ComparisonConfig) -> LibraryOutcome {
    let reference = match load_metadata(&library.reference, Side::Reference) {
        Ok(metadata) => metadata,
        Err(e) => return LibraryOutcome::failed(&library.name, &e),
    };
    let target = match load_metadata(&library.target, Side::Target) {
        Ok(metadata) => metadata,
        Err(e) => return LibraryOutcome::failed(&library.name, &e),
    };

    compare_outcome(
        &LibraryInput {
            name: library.name.clone(),
            reference,
            target,
        },
        config,
    )
}

fn print_text_report(report: &ApiDiffReport) {
    for outcome in &report.libraries {
        match outcome {
            LibraryOutcome::Compared(diff) => print_text_diff(diff),
            LibraryOutcome::Failed { library, error } => {
                println!("API Parity: {library}");
                println!("{}", "=".repeat(60));
                println!("  FAILED: {error}");
            }
        }
        println!();
    }

    print_text_totals(&report.totals, report.failed);
}

fn print_text_totals(totals: &Summary, failed: usize) {
    println!("Totals");
    println!("{}", "=".repeat(60));
    println!(
        "  Matched types: {} ({} with differences)",
        totals.matched, totals.matched_with_differences
    );
    println!("  Unmatched reference types: {}", totals.unmatched_reference);
    println!("  Unmatched target types: {}", totals.unmatched_target);
    println!("  Failed libraries: {failed}");
}

fn print_tsv_report(report: &ApiDiffReport) {
    println!("{TSV_HEADER}");
    for outcome in &report.libraries {
        match outcome {
            LibraryOutcome::Compared(diff) => print_tsv_rows(diff),
            LibraryOutcome::Failed { library, error } => {
                println!("{library}\tfailed\t\t\t{error}");
            }
        }
    }
}
