//! # Entity Registry
//!
//! Accumulates the agents, sites, agent→site membership and rule labels
//! mentioned by the extracted events, deduplicating everything by slug.
//!
//! The registry is populated in a single pass over bindings then
//! unbindings and never mutated afterwards. Label resolution happens once
//! per slug, on first sight; later sightings of the same slug are cache
//! hits. A site belongs to the first agent it was seen under.

use crate::extract::BondEvent;
use crate::labels::{ResolvedEntity, resolve_entity, resolve_label};
use crate::store::TripleStore;
use crate::Term;
use std::collections::{BTreeMap, BTreeSet};

/// The deduplicated entities of one model.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    agents: BTreeMap<String, ResolvedEntity>,
    sites: BTreeMap<String, ResolvedEntity>,
    agent_sites: BTreeMap<String, Vec<String>>,
    rules: BTreeMap<String, String>,
    placed_sites: BTreeSet<String>,
}

impl Registry {
    /// Build the registry from the extracted events, bindings first.
    #[must_use]
    pub fn build<'a>(
        store: &TripleStore,
        events: impl IntoIterator<Item = &'a BondEvent>,
    ) -> Self {
        let mut registry = Self::default();
        for event in events {
            registry.observe(store, event);
        }
        registry
    }

    fn observe(&mut self, store: &TripleStore, event: &BondEvent) {
        self.observe_pair(store, &event.agent_a, &event.site_a);
        self.observe_pair(store, &event.agent_b, &event.site_b);

        let rule_slug = event.rule.slug().to_string();
        if !self.rules.contains_key(&rule_slug) {
            self.rules
                .insert(rule_slug, resolve_label(store, &event.rule));
        }
    }

    fn observe_pair(&mut self, store: &TripleStore, agent: &Term, site: &Term) {
        let agent_slug = agent.slug().to_string();
        let site_slug = site.slug().to_string();

        if !self.agents.contains_key(&agent_slug) {
            self.agents
                .insert(agent_slug.clone(), resolve_entity(store, agent));
        }
        if !self.sites.contains_key(&site_slug) {
            self.sites
                .insert(site_slug.clone(), resolve_entity(store, site));
        }

        // The membership entry exists even when every site it mentions was
        // claimed earlier by another agent; a site joins exactly one list.
        let members = self.agent_sites.entry(agent_slug).or_default();
        if self.placed_sites.insert(site_slug.clone()) {
            members.push(site_slug);
        }
    }

    /// Agent slug -> resolved entity, ascending by slug.
    #[must_use]
    pub fn agents(&self) -> &BTreeMap<String, ResolvedEntity> {
        &self.agents
    }

    /// Site slug -> resolved entity, ascending by slug.
    #[must_use]
    pub fn sites(&self) -> &BTreeMap<String, ResolvedEntity> {
        &self.sites
    }

    /// Agent slug -> site slugs in first-seen order.
    #[must_use]
    pub fn agent_sites(&self) -> &BTreeMap<String, Vec<String>> {
        &self.agent_sites
    }

    /// Rule slug -> resolved label.
    #[must_use]
    pub fn rules(&self) -> &BTreeMap<String, String> {
        &self.rules
    }

    /// Resolved label for one rule slug.
    #[must_use]
    pub fn rule_label(&self, slug: &str) -> Option<&str> {
        self.rules.get(slug).map(String::as_str)
    }
}

// =============================================================================
// TESTS
// =============================================================================
