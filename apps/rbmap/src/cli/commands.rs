//! # CLI Command Implementation
//!
//! The single rbmap command: load a model, optionally enrich it, run the
//! pipeline, print the contact map. Rendering starts only after the whole
//! model has been extracted and registered, so a fatal error can never
//! leave partial output behind.

use crate::enrich::{self, HttpFetcher};
use rbmap_core::{ContactMap, RbmapError, TripleStore, parse_turtle, render_dot};
use std::io::Read;

// =============================================================================
// OUTPUT FORMATS
// =============================================================================

/// How the contact map is serialized on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Graphviz `graph` block.
    Dot,
    /// Pretty-printed JSON dump of the same map.
    Json,
}

impl OutputFormat {
    /// Parse a format name from the command line.
    pub fn parse(name: &str) -> Result<Self, RbmapError> {
        match name {
            "dot" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            other => Err(RbmapError::Io(format!(
                "unknown output format '{other}'. Use: dot, json"
            ))),
        }
    }
}

// =============================================================================
// CONTACT MAP COMMAND
// =============================================================================

/// Run the whole tool: read, parse, (enrich,) map, print.
pub fn cmd_contact_map(
    file: &str,
    input_format: &str,
    format: &str,
    fetch: bool,
) -> Result<(), RbmapError> {
    // Validate everything cheap before touching the input.
    if input_format != "turtle" {
        return Err(RbmapError::GraphInit(format!(
            "unknown input format '{input_format}', only turtle is supported"
        )));
    }
    let output_format = OutputFormat::parse(format)?;

    let (text, base) = read_input(file)?;
    tracing::info!("parsing {base}");
    let mut store = load_store(&text, &base)?;

    if fetch {
        let fetcher = HttpFetcher::new()?;
        let loaded = enrich::enrich(&mut store, &fetcher);
        tracing::info!("merged {loaded} external resources");
    }

    let rendered = render_model(&store, output_format)?;
    print!("{rendered}");
    Ok(())
}

/// Read the model text from a file or stdin, with the base URI the
/// triples resolve against.
pub fn read_input(path: &str) -> Result<(String, String), RbmapError> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| RbmapError::Io(format!("read stdin: {e}")))?;
        Ok((text, "stdin:".to_string()))
    } else {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RbmapError::Io(format!("read {path}: {e}")))?;
        Ok((text, format!("file://{path}")))
    }
}

/// Parse the input into a triple store. Parse failures are fatal.
pub fn load_store(text: &str, base: &str) -> Result<TripleStore, RbmapError> {
    let triples = parse_turtle(text, base)?;
    if triples.is_empty() {
        tracing::warn!("input contained no triples");
    }
    let store = TripleStore::from_triples(triples);
    tracing::debug!("loaded {} triples", store.len());
    Ok(store)
}

/// Run the pipeline over a loaded store and serialize the result.
pub fn render_model(store: &TripleStore, format: OutputFormat) -> Result<String, RbmapError> {
    tracing::info!("calculating bindings");
    let bindings = rbmap_core::bindings(store);

    tracing::info!("calculating unbindings");
    let unbindings = rbmap_core::unbindings(store);

    tracing::info!("finding labels and types");
    let map = ContactMap::from_events(store, &bindings, &unbindings);

    tracing::info!(
        agents = map.agents.len(),
        bindings = map.bindings.len(),
        unbindings = map.unbindings.len(),
        "constructing output"
    );
    match format {
        OutputFormat::Dot => Ok(render_dot(&map)),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&map)
                .map_err(|e| RbmapError::Io(format!("serialize contact map: {e}")))?;
            text.push('\n');
            Ok(text)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
