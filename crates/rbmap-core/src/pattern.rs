//! # Graph-Pattern Matcher
//!
//! A minimal declarative pattern language over the triple store:
//! `query(pattern) -> rows` of bound variables.
//!
//! The engine only ever asks about six fixed shapes (two event shapes,
//! five label strategies sharing one form, one type strategy), so this is
//! deliberately not a general join engine: clauses are evaluated left to
//! right, each one extending the candidate rows against the store, with
//! shared variables enforcing joins. Results are deduplicated and sorted,
//! which is what makes downstream extraction order-independent.

use crate::store::TripleStore;
use crate::{Term, Triple};
use std::collections::{BTreeMap, BTreeSet};

/// One solution: variable name -> bound term.
pub type Row = BTreeMap<String, Term>;

// =============================================================================
// PATTERN TERMS
// =============================================================================

/// One position of a triple pattern: a named variable or a fixed term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermPattern {
    /// A variable, bound by matching and shared across clauses.
    Var(String),
    /// A fixed term that must match exactly.
    Is(Term),
}

impl TermPattern {
    /// A variable position.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// A fixed IRI position.
    #[must_use]
    pub fn iri(iri: &str) -> Self {
        Self::Is(Term::iri(iri))
    }

    /// The term this position requires given the bindings so far, if any.
    fn resolved(&self, row: &Row) -> Option<Term> {
        match self {
            Self::Is(term) => Some(term.clone()),
            Self::Var(name) => row.get(name).cloned(),
        }
    }

    /// Record the match of this position against `term`, extending `row`
    /// for unbound variables. Returns false on a conflict.
    fn accept(&self, row: &mut Row, term: &Term) -> bool {
        match self {
            Self::Is(want) => want == term,
            Self::Var(name) => match row.get(name) {
                Some(bound) => bound == term,
                None => {
                    row.insert(name.clone(), term.clone());
                    true
                }
            },
        }
    }
}

// =============================================================================
// PATTERNS
// =============================================================================

/// One (subject, predicate, object) clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: TermPattern,
    pub object: TermPattern,
}

/// An ordered conjunction of triple patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    clauses: Vec<TriplePattern>,
}

impl Pattern {
    /// Create an empty pattern. An empty pattern has exactly one (empty)
    /// solution row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause. Builder style, so fixed shapes read declaratively.
    #[must_use]
    pub fn clause(mut self, subject: TermPattern, predicate: TermPattern, object: TermPattern) -> Self {
        self.clauses.push(TriplePattern {
            subject,
            predicate,
            object,
        });
        self
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when the pattern has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate against a store: left-to-right clause joins, then
    /// distinct rows in sorted order.
    #[must_use]
    pub fn solve(&self, store: &TripleStore) -> Vec<Row> {
        let mut rows = vec![Row::new()];

        for clause in &self.clauses {
            let mut next = Vec::new();
            for row in &rows {
                let subject = clause.subject.resolved(row);
                let predicate = clause.predicate.resolved(row);
                let object = clause.object.resolved(row);

                for triple in
                    store.matching(subject.as_ref(), predicate.as_ref(), object.as_ref())
                {
                    if let Some(extended) = extend(row, clause, triple) {
                        next.push(extended);
                    }
                }
            }
            rows = next;
            if rows.is_empty() {
                break;
            }
        }

        let distinct: BTreeSet<Row> = rows.into_iter().collect();
        distinct.into_iter().collect()
    }
}

/// Extend a row with one triple's bindings, or None on conflict.
fn extend(row: &Row, clause: &TriplePattern, triple: &Triple) -> Option<Row> {
    let mut extended = row.clone();
    let ok = clause.subject.accept(&mut extended, &triple.subject)
        && clause.predicate.accept(&mut extended, &triple.predicate)
        && clause.object.accept(&mut extended, &triple.object);
    ok.then_some(extended)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(Term::iri(s), Term::iri(p), Term::iri(o))
    }

    fn demo_store() -> TripleStore {
        TripleStore::from_triples([
            t("alice", "knows", "bob"),
            t("bob", "knows", "carol"),
            t("alice", "age", "30"),
            t("carol", "knows", "alice"),
        ])
    }

    #[test]
    fn single_clause_binds_variables() {
        let store = demo_store();
        let pattern = Pattern::new().clause(
            TermPattern::var("who"),
            TermPattern::iri("knows"),
            TermPattern::var("whom"),
        );

        let rows = store.query(&pattern);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.contains_key("who") && r.contains_key("whom")));
    }

    #[test]
    fn shared_variable_joins_clauses() {
        let store = demo_store();
        // ?a knows ?b . ?b knows ?c
        let pattern = Pattern::new()
            .clause(
                TermPattern::var("a"),
                TermPattern::iri("knows"),
                TermPattern::var("b"),
            )
            .clause(
                TermPattern::var("b"),
                TermPattern::iri("knows"),
                TermPattern::var("c"),
            );

        let rows = store.query(&pattern);
        let chains: Vec<(String, String, String)> = rows
            .iter()
            .filter_map(|r| {
                Some((
                    r.get("a")?.as_str().to_string(),
                    r.get("b")?.as_str().to_string(),
                    r.get("c")?.as_str().to_string(),
                ))
            })
            .collect();
        assert!(chains.contains(&("alice".into(), "bob".into(), "carol".into())));
        assert!(chains.contains(&("bob".into(), "carol".into(), "alice".into())));
        assert_eq!(chains.len(), 3);
    }

    #[test]
    fn repeated_variable_within_clause_must_agree() {
        let store = TripleStore::from_triples([t("x", "eq", "x"), t("x", "eq", "y")]);
        let pattern = Pattern::new().clause(
            TermPattern::var("v"),
            TermPattern::iri("eq"),
            TermPattern::var("v"),
        );

        let rows = store.query(&pattern);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("v"), Some(&Term::iri("x")));
    }

    #[test]
    fn unmatched_clause_yields_no_rows() {
        let store = demo_store();
        let pattern = Pattern::new().clause(
            TermPattern::var("s"),
            TermPattern::iri("missing"),
            TermPattern::var("o"),
        );
        assert!(store.query(&pattern).is_empty());
    }

    #[test]
    fn results_are_distinct_and_sorted() {
        // Two different subjects both know bob; projecting only the object
        // position still keeps rows distinct because subjects differ.
        let store = TripleStore::from_triples([t("a", "knows", "bob"), t("c", "knows", "bob")]);
        let pattern = Pattern::new().clause(
            TermPattern::var("s"),
            TermPattern::iri("knows"),
            TermPattern::var("o"),
        );
        let rows = store.query(&pattern);
        assert_eq!(rows.len(), 2);
        let subjects: Vec<_> = rows.iter().filter_map(|r| r.get("s")).collect();
        assert_eq!(subjects, vec![&Term::iri("a"), &Term::iri("c")]);
    }

    #[test]
    fn empty_pattern_has_one_empty_solution() {
        let store = demo_store();
        let rows = store.query(&Pattern::new());
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_empty());
    }
}
