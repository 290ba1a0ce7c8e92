//! # Rule Codes
//!
//! Short stable codes for the rules that appear in events: `b0..b(n-1)`
//! for binding rules, `u0..u(m-1)` for unbinding rules.
//!
//! Within each partition, rules sort ascending by resolved label with the
//! rule slug as the tie-break, so two rules sharing a label still get a
//! reproducible order. A rule seen in both partitions counts as binding
//! and is coded exactly once.

use crate::extract::BondEvent;
use crate::registry::Registry;
use std::collections::{BTreeMap, BTreeSet};

/// The assigned rule codes and their legend enumeration order.
#[derive(Debug, Clone, Default)]
pub struct RuleCodes {
    codes: BTreeMap<String, String>,
    legend_order: Vec<String>,
}

impl RuleCodes {
    /// Partition, sort and code the rules observed in the event sets.
    #[must_use]
    pub fn assign(
        registry: &Registry,
        bindings: &BTreeSet<BondEvent>,
        unbindings: &BTreeSet<BondEvent>,
    ) -> Self {
        let binding_rules: BTreeSet<String> = rule_slugs(bindings);
        let unbinding_rules: BTreeSet<String> = rule_slugs(unbindings)
            .into_iter()
            .filter(|slug| !binding_rules.contains(slug))
            .collect();

        let mut codes = BTreeMap::new();
        let mut legend_order = Vec::new();
        for (prefix, partition) in [("b", binding_rules), ("u", unbinding_rules)] {
            for (index, slug) in sorted_by_label(registry, partition).into_iter().enumerate() {
                codes.insert(slug.clone(), format!("{prefix}{index}"));
                legend_order.push(slug);
            }
        }

        Self { codes, legend_order }
    }

    /// The code for a rule slug, if the rule appeared in any event.
    #[must_use]
    pub fn code(&self, rule_slug: &str) -> Option<&str> {
        self.codes.get(rule_slug).map(String::as_str)
    }

    /// Rule slugs in legend order: all binding codes, then all unbinding
    /// codes.
    #[must_use]
    pub fn legend_order(&self) -> &[String] {
        &self.legend_order
    }

    /// Number of coded rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no rule was coded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn rule_slugs(events: &BTreeSet<BondEvent>) -> BTreeSet<String> {
    events.iter().map(|e| e.rule.slug().to_string()).collect()
}

/// Ascending by resolved label, ties broken by slug. Rules missing from
/// the registry sort by their slug alone; that cannot happen for slugs
/// drawn from the same events the registry was built over.
fn sorted_by_label(registry: &Registry, partition: BTreeSet<String>) -> Vec<String> {
    let mut slugs: Vec<String> = partition.into_iter().collect();
    slugs.sort_by(|a, b| {
        let label_a = registry.rule_label(a).unwrap_or(a);
        let label_b = registry.rule_label(b).unwrap_or(b);
        label_a.cmp(label_b).then_with(|| a.cmp(b))
    });
    slugs
}

// =============================================================================
// TESTS
// =============================================================================
