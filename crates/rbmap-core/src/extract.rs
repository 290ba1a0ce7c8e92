//! # Event Extraction
//!
//! Detects the binding and unbinding events implied by each rule's
//! precondition/postcondition patterns.
//!
//! A binding is two agent/site pairs that are unbound (`rbmo:Nothing`) on
//! the rule's left-hand side and share one structurally identical binding
//! partner on the right-hand side; an unbinding is the mirror image. The
//! shared partner must be a blank node — that is how the models say "the
//! same bond" without naming it. Sharing is enforced by the single `bond`
//! variable joining both halves of the pattern; "both merely non-unbound"
//! is not enough.
//!
//! Each undirected edge would match twice (A/B swapped), so a tuple is
//! emitted only when siteA's identifier sorts strictly before siteB's.
//! If more than two site pairs share one bond value (malformed input),
//! every qualifying ordered pair is emitted.

use crate::pattern::{Pattern, Row, TermPattern};
use crate::store::TripleStore;
use crate::{Term, vocab};
use std::collections::BTreeSet;

/// One extracted event: a rule connecting (or disconnecting) two sites.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BondEvent {
    pub rule: Term,
    pub agent_a: Term,
    pub site_a: Term,
    pub agent_b: Term,
    pub site_b: Term,
}

/// All binding events in the model, deduplicated, in deterministic order.
#[must_use]
pub fn bindings(store: &TripleStore) -> BTreeSet<BondEvent> {
    extract(store, vocab::RBMO_LHS, vocab::RBMO_RHS)
}

/// All unbinding events in the model, deduplicated, in deterministic order.
#[must_use]
pub fn unbindings(store: &TripleStore) -> BTreeSet<BondEvent> {
    extract(store, vocab::RBMO_RHS, vocab::RBMO_LHS)
}

/// Shared shape: on `unbound_side` both sites carry `rbmo:Nothing`, on
/// `bonded_side` both carry the same `bond` value. Binding and unbinding
/// differ only in which rule side is which.
fn extract(store: &TripleStore, unbound_side: &str, bonded_side: &str) -> BTreeSet<BondEvent> {
    let pattern = event_pattern(unbound_side, bonded_side);
    store
        .query(&pattern)
        .into_iter()
        .filter_map(|row| event_from_row(&row))
        .collect()
}

fn event_pattern(unbound_side: &str, bonded_side: &str) -> Pattern {
    let mut pattern = Pattern::new();
    for suffix in ["a", "b"] {
        pattern = site_half(pattern, unbound_side, bonded_side, suffix);
    }
    pattern
}

/// Clauses for one of the two agent/site pairs.
fn site_half(pattern: Pattern, unbound_side: &str, bonded_side: &str, suffix: &str) -> Pattern {
    let rule = || TermPattern::var("rule");
    let agent = TermPattern::var(format!("agent_{suffix}"));
    let site = TermPattern::var(format!("site_{suffix}"));
    let unbound_state = TermPattern::var(format!("unbound_state_{suffix}"));
    let bonded_state = TermPattern::var(format!("bonded_state_{suffix}"));

    pattern
        .clause(rule(), TermPattern::iri(unbound_side), TermPattern::var(format!("pre_{suffix}")))
        .clause(
            TermPattern::var(format!("pre_{suffix}")),
            TermPattern::iri(vocab::RBMO_AGENT),
            agent.clone(),
        )
        .clause(
            TermPattern::var(format!("pre_{suffix}")),
            TermPattern::iri(vocab::RBMO_STATE),
            unbound_state.clone(),
        )
        .clause(
            unbound_state.clone(),
            TermPattern::iri(vocab::RBMO_BINDING),
            TermPattern::iri(vocab::RBMO_NOTHING),
        )
        .clause(
            unbound_state,
            TermPattern::iri(vocab::RBMO_SITE),
            site.clone(),
        )
        .clause(rule(), TermPattern::iri(bonded_side), TermPattern::var(format!("post_{suffix}")))
        .clause(
            TermPattern::var(format!("post_{suffix}")),
            TermPattern::iri(vocab::RBMO_AGENT),
            agent,
        )
        .clause(
            TermPattern::var(format!("post_{suffix}")),
            TermPattern::iri(vocab::RBMO_STATE),
            bonded_state.clone(),
        )
        .clause(
            bonded_state.clone(),
            TermPattern::iri(vocab::RBMO_BINDING),
            TermPattern::var("bond"),
        )
        .clause(bonded_state, TermPattern::iri(vocab::RBMO_SITE), site)
}

/// Keep a row only when the shared bond is a blank node and the site pair
/// is in canonical order.
fn event_from_row(row: &Row) -> Option<BondEvent> {
    let bond = row.get("bond")?;
    if !bond.is_blank() {
        return None;
    }
    let site_a = row.get("site_a")?;
    let site_b = row.get("site_b")?;
    if site_a.as_str() >= site_b.as_str() {
        return None;
    }
    Some(BondEvent {
        rule: row.get("rule")?.clone(),
        agent_a: row.get("agent_a")?.clone(),
        site_a: site_a.clone(),
        agent_b: row.get("agent_b")?.clone(),
        site_b: site_b.clone(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
