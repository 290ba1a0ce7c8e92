//! # rbmap CLI Module
//!
//! Argument parsing and command execution for the rbmap binary.
//!
//! The tool is single-purpose, so there are no subcommands: every
//! invocation reads one model and writes one contact map.

mod commands;

use clap::Parser;
use rbmap_core::RbmapError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// rbmap - contact maps from RBMO rule models
///
/// Reads a Turtle document describing a rule-based molecular model and
/// prints a clustered Graphviz graph of agents, sites and the
/// binding/unbinding events connecting them.
#[derive(Parser, Debug)]
#[command(name = "rbmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file path, or "-" for standard input
    #[arg(short, long, default_value = "-")]
    pub file: String,

    /// Input format (only "turtle" is supported)
    #[arg(short, long, default_value = "turtle")]
    pub input_format: String,

    /// Output format: "dot" or "json"
    #[arg(short = 't', long, default_value = "dot")]
    pub format: String,

    /// Fetch externally referenced annotation resources over HTTP and
    /// merge them into the graph before mapping
    #[arg(long)]
    pub fetch: bool,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: &Cli) -> Result<(), RbmapError> {
    cmd_contact_map(&cli.file, &cli.input_format, &cli.format, cli.fetch)
}
