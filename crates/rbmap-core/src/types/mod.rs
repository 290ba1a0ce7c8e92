//! # Core Type Definitions
//!
//! This module contains the core types for the rbmap contact-map engine:
//! - RDF terms and triples (`Term`, `Triple`)
//! - Identifier normalization (`slug_of`, `trailing_fragment`)
//! - Error types (`RbmapError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module implement `Ord` so they can live in
//! `BTreeMap`/`BTreeSet` and enumerate in a stable order regardless of
//! insertion order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// TERMS
// =============================================================================

/// A node in the triple graph.
///
/// Blank nodes carry a document-scoped label; in RBMO models they stand for
/// anonymous shared values, most importantly "the same binding partner"
/// linking two sites without naming it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A full IRI, e.g. `http://purl.org/rbm/rbmo#site`.
    Iri(String),
    /// A blank node label, e.g. `genid4`.
    Blank(String),
    /// A literal's lexical form. Datatype and language annotations are
    /// dropped at parse time; only the text participates in comparisons.
    Literal(String),
}

impl Term {
    /// Create an IRI term.
    #[must_use]
    pub fn iri(s: impl Into<String>) -> Self {
        Self::Iri(s.into())
    }

    /// Create a blank-node term.
    #[must_use]
    pub fn blank(s: impl Into<String>) -> Self {
        Self::Blank(s.into())
    }

    /// Create a literal term.
    #[must_use]
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    /// The comparable string of the term: IRI text, blank label, or literal
    /// text. All orderings and tie-breaks in the engine are defined over
    /// this string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Iri(s) | Self::Blank(s) | Self::Literal(s) => s,
        }
    }

    /// True for blank nodes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// True for IRIs.
    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    /// Short local identifier for the term (see [`slug_of`]).
    #[must_use]
    pub fn slug(&self) -> &str {
        slug_of(self.as_str())
    }
}

// =============================================================================
// TRIPLES
// =============================================================================

/// A (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    /// Create a new triple.
    #[must_use]
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

// =============================================================================
// IDENTIFIER NORMALIZATION
// =============================================================================

/// Derive a short local identifier from a resource identifier.
///
/// Takes the substring after the last `/`, then the substring of that after
/// its last `#`. If neither separator is present the identifier is returned
/// unchanged.
///
/// ```
/// use rbmap_core::slug_of;
/// assert_eq!(slug_of("http://example.org/model#KaiC"), "KaiC");
/// assert_eq!(slug_of("urn:local:KaiC"), "urn:local:KaiC");
/// ```
#[must_use]
pub fn slug_of(identifier: &str) -> &str {
    let tail = identifier.rsplit('/').next().unwrap_or(identifier);
    tail.rsplit('#').next().unwrap_or(tail)
}

/// The trailing fragment of a slug: the substring after its last `:`.
///
/// This is the display fallback for resources with no resolvable label.
#[must_use]
pub fn trailing_fragment(slug: &str) -> &str {
    slug.rsplit(':').next().unwrap_or(slug)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building a contact map.
///
/// - No silent failures
/// - Use `Result<T, RbmapError>` for fallible operations
/// - The engine never panics; errors are either recoverable or fatal-clean
#[derive(Debug, Error)]
pub enum RbmapError {
    /// The input is not a well-formed triple document. Fatal: reported
    /// before any output is written.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The triple graph could not be constructed from the input.
    #[error("graph initialization failed: {0}")]
    GraphInit(String),

    /// An externally referenced resource could not be retrieved or parsed.
    /// Recoverable: the resource falls back to its slug-derived label.
    #[error("failed to fetch {resource}: {message}")]
    Fetch { resource: String, message: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_path_then_fragment() {
        assert_eq!(slug_of("http://example.org/a/b#frag"), "frag");
        assert_eq!(slug_of("http://example.org/a/b"), "b");
        assert_eq!(slug_of("plain"), "plain");
    }

    #[test]
    fn slug_fragment_split_applies_to_path_tail() {
        assert_eq!(slug_of("http://example.org/x#a"), "a");
        assert_eq!(slug_of("urn:miriam:GO#term"), "term");
    }

    #[test]
    fn trailing_fragment_splits_on_colon() {
        assert_eq!(trailing_fragment("GO:0005634"), "0005634");
        assert_eq!(trailing_fragment("nucleus"), "nucleus");
    }

    #[test]
    fn term_comparable_string_covers_all_variants() {
        assert_eq!(Term::iri("http://x/y").as_str(), "http://x/y");
        assert_eq!(Term::blank("b0").as_str(), "b0");
        assert_eq!(Term::literal("hello").as_str(), "hello");
    }

    #[test]
    fn term_slug_uses_comparable_string() {
        assert_eq!(Term::iri("http://example.org/m#site1").slug(), "site1");
    }

    #[test]
    fn terms_order_deterministically() {
        let mut set = std::collections::BTreeSet::new();
        set.insert(Term::iri("b"));
        set.insert(Term::iri("a"));
        let ordered: Vec<_> = set.iter().map(Term::as_str).collect();
        assert_eq!(ordered, vec!["a", "b"]);
    }
}
