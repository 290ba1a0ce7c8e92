//! # rbmap-core
//!
//! The deterministic contact-map engine for rbmap - THE LOGIC.
//!
//! This crate turns an RBMO-flavoured triple graph into a contact map:
//! a clustered graph of molecular agents, their interaction sites, and
//! the binding/unbinding events the model's rules imply.
//!
//! ## Pipeline
//!
//! ```text
//! turtle text -> TripleStore -> extract::{bindings, unbindings}
//!             -> Registry (via labels) -> RuleCodes
//!             -> ContactMap -> render_dot
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no I/O, no network, no async (the binary owns all of that)
//! - Deterministic: BTree collections only, no `HashMap`, no floats; the
//!   same triples always yield byte-identical output
//! - Phases are strictly sequential and the store is immutable once the
//!   pipeline starts; every enumeration order is documented and sorted

// =============================================================================
// MODULES
// =============================================================================

pub mod codes;
pub mod extract;
pub mod labels;
pub mod map;
pub mod pattern;
pub mod registry;
pub mod render;
pub mod store;
pub mod turtle;
pub mod types;
pub mod vocab;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{RbmapError, Term, Triple, slug_of, trailing_fragment};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use codes::RuleCodes;
pub use extract::{BondEvent, bindings, unbindings};
pub use labels::{ResolvedEntity, resolve_entity, resolve_kind, resolve_label};
pub use map::{AgentEntry, ContactMap, EdgeEntry, RuleEntry, SiteEntry};
pub use pattern::{Pattern, Row, TermPattern, TriplePattern};
pub use registry::Registry;
pub use render::render_dot;
pub use store::TripleStore;
pub use turtle::parse_turtle;
