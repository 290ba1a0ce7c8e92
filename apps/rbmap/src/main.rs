//! # rbmap
//!
//! Derive a contact map from an RBMO-flavoured RDF rule model.
//!
//! ## Usage
//!
//! ```bash
//! # Contact map of a model file, rendered by Graphviz
//! rbmap -f model.ttl | dot -Tpdf -o contact-map.pdf
//!
//! # From stdin, fetching external annotations first
//! cat model.ttl | rbmap --fetch
//!
//! # Machine-readable output
//! rbmap -f model.ttl -t json
//! ```
//!
//! Diagnostics go to stderr; stdout carries nothing but the graph.

use clap::Parser;
use rbmap::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = cli::execute(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr — RBMAP_LOG_FORMAT=json enables
/// machine-parseable output. stdout is reserved for the contact map.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_directive = if verbose {
        "rbmap=debug,rbmap_core=debug"
    } else if quiet {
        "rbmap=error"
    } else {
        "rbmap=info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive.into());

    let log_format = std::env::var("RBMAP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
