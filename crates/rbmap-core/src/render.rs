//! # Contact Map Rendering
//!
//! Serializes a [`ContactMap`] into a Graphviz `graph` block: one cluster
//! per agent, one node per site, solid edges for bindings, dashed edges
//! for unbindings, and the rule legend as the graph label.
//!
//! Slugs become node anchors after substituting every character that is
//! not valid in a bare DOT identifier (`:` and `-` being the usual
//! offenders) with `_`. Displayed labels are never touched by anchor
//! escaping; they only get DOT string quoting.

use crate::map::ContactMap;
use crate::slug_of;

/// Render the map as a Graphviz `graph` document.
#[must_use]
pub fn render_dot(map: &ContactMap) -> String {
    let mut out = String::from("graph {\n");

    for agent in &map.agents {
        out.push_str(&format!(
            "    subgraph cluster_{} {{\n",
            anchor(&agent.slug)
        ));
        let mut label = agent.label.clone();
        if let Some(kind) = &agent.kind {
            label.push_str(&format!(" ({})", slug_of(kind)));
        }
        out.push_str(&format!("        label=\"{}\";\n", quote(&label)));
        for site in &agent.sites {
            out.push_str(&format!(
                "        {} [label=\"{}\"];\n",
                anchor(&site.slug),
                quote(&site.label)
            ));
        }
        out.push_str("    }\n");
    }

    for edge in &map.bindings {
        out.push_str(&format!(
            "    {} -- {} [label=\"{}\"];\n",
            anchor(&edge.site_a),
            anchor(&edge.site_b),
            edge.rule_code
        ));
    }
    for edge in &map.unbindings {
        out.push_str(&format!(
            "    {} -- {} [label=\"{}\",style=dashed];\n",
            anchor(&edge.site_a),
            anchor(&edge.site_b),
            edge.rule_code
        ));
    }

    let legend = map
        .rules
        .iter()
        .map(|rule| format!("{}: {}", rule.code, quote(&rule.label)))
        .collect::<Vec<_>>()
        .join("\\n");
    out.push_str(&format!("    label=\"{legend}\";\n}}\n"));

    out
}

/// A slug as a bare DOT identifier: anything outside `[A-Za-z0-9_]`
/// becomes `_`, and a leading digit gets an underscore prefix.
fn anchor(slug: &str) -> String {
    let mut out: String = slug
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// Escape a label for use inside a DOT double-quoted string.
fn quote(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{AgentEntry, EdgeEntry, RuleEntry, SiteEntry};

    fn demo_map() -> ContactMap {
        ContactMap {
            agents: vec![
                AgentEntry {
                    slug: "KaiA".into(),
                    label: "KaiA".into(),
                    kind: Some("http://www.biopax.org/release/biopax-level3.owl#Protein".into()),
                    sites: vec![SiteEntry {
                        slug: "a1".into(),
                        label: "PAS domain".into(),
                        kind: None,
                    }],
                },
                AgentEntry {
                    slug: "KaiC".into(),
                    label: "KaiC".into(),
                    kind: None,
                    sites: vec![SiteEntry {
                        slug: "c1".into(),
                        label: "c1".into(),
                        kind: None,
                    }],
                },
            ],
            rules: vec![
                RuleEntry {
                    slug: "bind".into(),
                    label: "KaiA binds KaiC".into(),
                    code: "b0".into(),
                },
                RuleEntry {
                    slug: "release".into(),
                    label: "KaiA releases KaiC".into(),
                    code: "u0".into(),
                },
            ],
            bindings: vec![EdgeEntry {
                rule_code: "b0".into(),
                site_a: "a1".into(),
                site_b: "c1".into(),
            }],
            unbindings: vec![EdgeEntry {
                rule_code: "u0".into(),
                site_a: "a1".into(),
                site_b: "c1".into(),
            }],
        }
    }

    #[test]
    fn clusters_nodes_and_edges_render() {
        let dot = render_dot(&demo_map());
        assert!(dot.starts_with("graph {\n"));
        assert!(dot.contains("subgraph cluster_KaiA {"));
        assert!(dot.contains("label=\"KaiA (Protein)\";"));
        assert!(dot.contains("a1 [label=\"PAS domain\"];"));
        assert!(dot.contains("    a1 -- c1 [label=\"b0\"];"));
        assert!(dot.contains("    a1 -- c1 [label=\"u0\",style=dashed];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn legend_lists_codes_in_order() {
        let dot = render_dot(&demo_map());
        assert!(dot.contains("label=\"b0: KaiA binds KaiC\\nu0: KaiA releases KaiC\";"));
    }

    #[test]
    fn agent_without_kind_has_no_suffix() {
        let dot = render_dot(&demo_map());
        assert!(dot.contains("label=\"KaiC\";"));
    }

    #[test]
    fn anchors_substitute_invalid_characters() {
        assert_eq!(anchor("GO:0005634"), "GO_0005634");
        assert_eq!(anchor("site-one"), "site_one");
        assert_eq!(anchor("plain"), "plain");
    }

    #[test]
    fn anchors_never_start_with_a_digit() {
        assert_eq!(anchor("5utr"), "_5utr");
    }

    #[test]
    fn labels_keep_their_punctuation() {
        let mut map = demo_map();
        map.agents[0].label = "complex: KaiA-KaiB \"dimer\"".into();
        let dot = render_dot(&map);
        assert!(dot.contains("label=\"complex: KaiA-KaiB \\\"dimer\\\" (Protein)\";"));
    }

    #[test]
    fn empty_map_is_a_valid_graph() {
        let empty = ContactMap {
            agents: Vec::new(),
            rules: Vec::new(),
            bindings: Vec::new(),
            unbindings: Vec::new(),
        };
        assert_eq!(render_dot(&empty), "graph {\n    label=\"\";\n}\n");
    }
}
