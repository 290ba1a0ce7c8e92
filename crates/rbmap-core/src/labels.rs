//! # Label Resolution
//!
//! Display labels and biological types for resources, pulled out of the
//! graph by an ordered chain of strategies.
//!
//! Each strategy is an ordinary [`Pattern`] binding a `value` variable; the
//! first strategy that produces any row wins, and the first (sorted) row's
//! value is taken. When nothing matches, the label falls back to the
//! trailing fragment of the resource's slug, so every resource always has
//! a printable name.

use crate::pattern::{Pattern, TermPattern};
use crate::store::TripleStore;
use crate::{Term, trailing_fragment, vocab};
use serde::{Deserialize, Serialize};

/// Resolved display data for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    /// Human-readable label, never empty.
    pub label: String,
    /// Biological classification, when the graph carries one. Kept as the
    /// full identifier; rendering shortens it to a slug.
    pub kind: Option<String>,
}

/// `<resource> <predicate> ?value`
fn direct(resource: &Term, predicate: &str) -> Pattern {
    Pattern::new().clause(
        TermPattern::Is(resource.clone()),
        TermPattern::iri(predicate),
        TermPattern::var("value"),
    )
}

/// `<resource> bqbiol:is ?ref . ?ref <predicate> ?value`
fn via_equivalent(resource: &Term, predicate: &str) -> Pattern {
    Pattern::new()
        .clause(
            TermPattern::Is(resource.clone()),
            TermPattern::iri(vocab::BQBIOL_IS),
            TermPattern::var("ref"),
        )
        .clause(
            TermPattern::var("ref"),
            TermPattern::iri(predicate),
            TermPattern::var("value"),
        )
}

/// The label strategies, in priority order.
fn label_strategies(resource: &Term) -> [Pattern; 5] {
    [
        direct(resource, vocab::RDFS_LABEL),
        direct(resource, vocab::DCT_TITLE),
        via_equivalent(resource, vocab::RDFS_LABEL),
        via_equivalent(resource, vocab::DCT_TITLE),
        // Last resort: show the raw sequence.
        direct(resource, vocab::SBOL_NUCLEOTIDES),
    ]
}

/// Resolve a display label for a resource.
#[must_use]
pub fn resolve_label(store: &TripleStore, resource: &Term) -> String {
    for strategy in label_strategies(resource) {
        if let Some(value) = first_value(store, &strategy) {
            return value;
        }
    }
    trailing_fragment(resource.slug()).to_string()
}

/// Resolve the biological type of a resource, if classified.
#[must_use]
pub fn resolve_kind(store: &TripleStore, resource: &Term) -> Option<String> {
    first_value(store, &direct(resource, vocab::BIOPAX_PHYSICAL_ENTITY))
}

/// Resolve label and type together.
#[must_use]
pub fn resolve_entity(store: &TripleStore, resource: &Term) -> ResolvedEntity {
    ResolvedEntity {
        label: resolve_label(store, resource),
        kind: resolve_kind(store, resource),
    }
}

fn first_value(store: &TripleStore, pattern: &Pattern) -> Option<String> {
    store
        .query(pattern)
        .into_iter()
        .next()
        .and_then(|row| row.get("value").map(|term| term.as_str().to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Triple;

    const KAIC: &str = "http://example.org/model#KaiC";

    fn label_triple(subject: &str, predicate: &str, text: &str) -> Triple {
        Triple::new(Term::iri(subject), Term::iri(predicate), Term::literal(text))
    }

    #[test]
    fn direct_label_wins() {
        let store = TripleStore::from_triples([
            label_triple(KAIC, vocab::RDFS_LABEL, "KaiC hexamer"),
            label_triple(KAIC, vocab::DCT_TITLE, "ignored title"),
        ]);
        assert_eq!(resolve_label(&store, &Term::iri(KAIC)), "KaiC hexamer");
    }

    #[test]
    fn title_used_when_no_label() {
        let store = TripleStore::from_triples([label_triple(KAIC, vocab::DCT_TITLE, "KaiC")]);
        assert_eq!(resolve_label(&store, &Term::iri(KAIC)), "KaiC");
    }

    #[test]
    fn label_reachable_through_equivalent_resource() {
        let external = "http://identifiers.org/uniprot/Q79PF4";
        let store = TripleStore::from_triples([
            Triple::new(
                Term::iri(KAIC),
                Term::iri(vocab::BQBIOL_IS),
                Term::iri(external),
            ),
            label_triple(external, vocab::RDFS_LABEL, "Circadian clock protein KaiC"),
        ]);
        assert_eq!(
            resolve_label(&store, &Term::iri(KAIC)),
            "Circadian clock protein KaiC"
        );
    }

    #[test]
    fn sequence_is_the_last_fallback_before_slug() {
        let store =
            TripleStore::from_triples([label_triple(KAIC, vocab::SBOL_NUCLEOTIDES, "atgagc")]);
        assert_eq!(resolve_label(&store, &Term::iri(KAIC)), "atgagc");
    }

    #[test]
    fn unresolved_label_falls_back_to_trailing_fragment() {
        let store = TripleStore::new();
        assert_eq!(resolve_label(&store, &Term::iri(KAIC)), "KaiC");
        assert_eq!(
            resolve_label(&store, &Term::iri("urn:miriam:GO:0005634")),
            "0005634"
        );
    }

    #[test]
    fn kind_comes_only_from_physical_entity() {
        let store = TripleStore::from_triples([
            label_triple(KAIC, vocab::BIOPAX_PHYSICAL_ENTITY, "Protein"),
        ]);
        let entity = resolve_entity(&store, &Term::iri(KAIC));
        assert_eq!(entity.kind.as_deref(), Some("Protein"));
        // No label triples, so the slug fallback applies to the label.
        assert_eq!(entity.label, "KaiC");
    }

    #[test]
    fn kind_absent_when_unclassified() {
        let store = TripleStore::new();
        assert_eq!(resolve_kind(&store, &Term::iri(KAIC)), None);
    }
}
