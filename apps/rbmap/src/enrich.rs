//! # External Enrichment
//!
//! Optional pre-pipeline step: find every annotation resource the model
//! points at through `bqbiol:is`, fetch it over HTTP, parse it as Turtle
//! and merge the triples into the store. Labels and types then resolve
//! from the merged graph.
//!
//! Every per-resource failure — unreachable host, non-success status,
//! unparseable payload — is logged and skipped; the affected resource
//! simply keeps its slug-derived label. Only the initial model load is
//! fatal, never enrichment.

use rbmap_core::{Pattern, RbmapError, Term, TermPattern, TripleStore, parse_turtle, vocab};
use std::collections::BTreeSet;
use std::time::Duration;

/// Retrieves the text of a remote resource. The production implementation
/// is [`HttpFetcher`]; tests substitute a stub.
pub trait Fetcher {
    fn fetch(&self, uri: &str) -> Result<String, RbmapError>;
}

// =============================================================================
// HTTP FETCHER
// =============================================================================

/// Blocking HTTP fetcher asking for Turtle.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a client with a conservative timeout.
    pub fn new() -> Result<Self, RbmapError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RbmapError::Io(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, uri: &str) -> Result<String, RbmapError> {
        let as_fetch_error = |e: reqwest::Error| RbmapError::Fetch {
            resource: uri.to_string(),
            message: e.to_string(),
        };
        self.client
            .get(uri)
            .header(reqwest::header::ACCEPT, "text/turtle")
            .send()
            .map_err(as_fetch_error)?
            .error_for_status()
            .map_err(as_fetch_error)?
            .text()
            .map_err(as_fetch_error)
    }
}

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Several identifier schemes in the wild don't answer description
/// requests at their canonical URI. This rewrites the ones with a known
/// working alternative.
#[must_use]
pub fn rewrite_uri(uri: &str) -> String {
    // identifiers.org doesn't content-negotiate; its info. mirror does.
    match uri.strip_prefix("http://identifiers.org") {
        Some(rest) => format!("http://info.identifiers.org{rest}"),
        None => uri.to_string(),
    }
}

/// Distinct external annotation IRIs referenced via `bqbiol:is`.
#[must_use]
pub fn external_resources(store: &TripleStore) -> Vec<String> {
    let pattern = Pattern::new().clause(
        TermPattern::var("subject"),
        TermPattern::iri(vocab::BQBIOL_IS),
        TermPattern::var("resource"),
    );
    let distinct: BTreeSet<String> = store
        .query(&pattern)
        .into_iter()
        .filter_map(|row| row.get("resource").cloned())
        .filter(Term::is_iri)
        .map(|term| term.as_str().to_string())
        .collect();
    distinct.into_iter().collect()
}

/// Fetch and merge every external resource. Returns how many resources
/// were merged successfully; failures are logged and skipped.
pub fn enrich(store: &mut TripleStore, fetcher: &dyn Fetcher) -> usize {
    let resources = external_resources(store);
    tracing::info!("found {} external resources", resources.len());

    let mut merged = 0;
    for uri in resources {
        let target = rewrite_uri(&uri);
        tracing::info!("loading {target}");
        match fetcher
            .fetch(&target)
            .and_then(|text| parse_turtle(&text, &target))
        {
            Ok(triples) => {
                let added = store.add_triples(triples);
                tracing::debug!("merged {added} triples from {target}");
                merged += 1;
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }
    merged
}

// =============================================================================
// TESTS
// =============================================================================
