//! Command-line interface for api-parity.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **diff**: Compare the reference and target metadata of one library
//! - **batch**: Compare every library listed in a configuration file
//! - **explain**: Show why one reference type did or did not match
//!
//! ## Usage
//!
//! ```text
//! # Compare one library
//! api-parity diff core.reference.json core.target.json --config parity.json
//!
//! # JSON report for tooling, failing the build on divergence
//! api-parity diff core.reference.json core.target.json --format json --check
//!
//! # Compare all configured libraries
//! api-parity batch parity.json
//!
//! # Trace the matching of a single type
//! api-parity explain core.reference.json core.target.json 'org.example.Outer$Inner'
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::core::config::ComparisonConfig;
use crate::parsing::config::load_config;

pub mod batch;
pub mod diff;
pub mod explain;

#[derive(Parser)]
#[command(name = "api-parity")]
#[command(version)]
#[command(about = "Track API divergence between a reference library and its port")]
#[command(
    long_about = "api-parity pairs every public type of a reference library with its counterpart in a ported implementation and reports what differs.\n\nTypes are matched through explicit overrides, declared equivalents, and naming heuristics:\n- Namespace casing and prefix rewrites\n- Interface prefixes and implementation suffixes\n- Nested types flattened on one side\n\nMatched types are then compared by modifiers, base type, contracts, and members."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the API surfaces of one library
    Diff(diff::DiffArgs),

    /// Compare every library listed in a configuration file
    Batch(batch::BatchArgs),

    /// Explain how a reference type is matched
    Explain(explain::ExplainArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Comparison settings from an optional configuration file
fn load_comparison_config(path: Option<&Path>) -> anyhow::Result<ComparisonConfig> {
    match path {
        Some(path) => Ok(load_config(path)?.comparison),
        None => Ok(ComparisonConfig::default()),
    }
}
