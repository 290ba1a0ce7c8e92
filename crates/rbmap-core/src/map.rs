//! # Contact Map Assembly
//!
//! Sequences the pipeline phases — extract bindings, extract unbindings,
//! populate the registry, assign rule codes — into one immutable
//! [`ContactMap`] value holding only resolved, slug-keyed data.
//!
//! Rendering never goes back to the triple store: everything the output
//! needs is here, which is also what makes the `json` output format a
//! faithful dump of the same map.

use crate::codes::RuleCodes;
use crate::extract::{self, BondEvent};
use crate::registry::Registry;
use crate::store::TripleStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One site inside an agent cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEntry {
    pub slug: String,
    pub label: String,
    /// Biological classification, full identifier. Not shown in DOT
    /// output, carried for the JSON export.
    pub kind: Option<String>,
}

/// One agent cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub slug: String,
    pub label: String,
    /// Biological classification, full identifier. Rendering shortens it.
    pub kind: Option<String>,
    /// Sites ascending by slug.
    pub sites: Vec<SiteEntry>,
}

/// One coded rule, in legend order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub slug: String,
    pub label: String,
    pub code: String,
}

/// One event edge between two sites, identified by slugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub rule_code: String,
    pub site_a: String,
    pub site_b: String,
}

/// The complete resolved contact map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMap {
    /// Agent clusters ascending by agent slug.
    pub agents: Vec<AgentEntry>,
    /// Coded rules: all binding rules, then all unbinding rules.
    pub rules: Vec<RuleEntry>,
    /// Binding events in deterministic order.
    pub bindings: Vec<EdgeEntry>,
    /// Unbinding events in deterministic order.
    pub unbindings: Vec<EdgeEntry>,
}

impl ContactMap {
    /// Run the whole pipeline over a loaded store.
    #[must_use]
    pub fn build(store: &TripleStore) -> Self {
        let bindings = extract::bindings(store);
        let unbindings = extract::unbindings(store);
        Self::from_events(store, &bindings, &unbindings)
    }

    /// Assemble the map from already-extracted events. Bindings are
    /// registered before unbindings.
    #[must_use]
    pub fn from_events(
        store: &TripleStore,
        bindings: &BTreeSet<BondEvent>,
        unbindings: &BTreeSet<BondEvent>,
    ) -> Self {
        let registry = Registry::build(store, bindings.iter().chain(unbindings.iter()));
        let codes = RuleCodes::assign(&registry, bindings, unbindings);

        let agents = registry
            .agent_sites()
            .iter()
            .map(|(agent_slug, members)| {
                let mut site_slugs = members.clone();
                site_slugs.sort();
                let sites = site_slugs
                    .into_iter()
                    .map(|slug| {
                        let (label, kind) = registry.sites().get(&slug).map_or_else(
                            || (slug.clone(), None),
                            |entity| (entity.label.clone(), entity.kind.clone()),
                        );
                        SiteEntry { slug, label, kind }
                    })
                    .collect();
                let (label, kind) = registry.agents().get(agent_slug).map_or_else(
                    || (agent_slug.clone(), None),
                    |entity| (entity.label.clone(), entity.kind.clone()),
                );
                AgentEntry {
                    slug: agent_slug.clone(),
                    label,
                    kind,
                    sites,
                }
            })
            .collect();

        let rules = codes
            .legend_order()
            .iter()
            .filter_map(|slug| {
                let code = codes.code(slug)?.to_string();
                let label = registry.rule_label(slug).unwrap_or(slug).to_string();
                Some(RuleEntry {
                    slug: slug.clone(),
                    label,
                    code,
                })
            })
            .collect();

        ContactMap {
            agents,
            rules,
            bindings: edge_entries(bindings, &codes),
            unbindings: edge_entries(unbindings, &codes),
        }
    }
}

fn edge_entries(events: &BTreeSet<BondEvent>, codes: &RuleCodes) -> Vec<EdgeEntry> {
    events
        .iter()
        .filter_map(|event| {
            let rule_code = codes.code(event.rule.slug())?.to_string();
            Some(EdgeEntry {
                rule_code,
                site_a: event.site_a.slug().to_string(),
                site_b: event.site_b.slug().to_string(),
            })
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
