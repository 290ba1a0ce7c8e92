//! # Vocabulary Constants
//!
//! The handful of IRIs the fixed query shapes ever touch.
//!
//! rbmap does no ontology processing; these constants exist so the pattern
//! definitions in `extract` and `labels` read as vocabulary, not as string
//! soup.

/// RBMO namespace prefix.
pub const RBMO: &str = "http://purl.org/rbm/rbmo#";

/// The precondition (left-hand side) of a rule.
pub const RBMO_LHS: &str = "http://purl.org/rbm/rbmo#lhs";

/// The postcondition (right-hand side) of a rule.
pub const RBMO_RHS: &str = "http://purl.org/rbm/rbmo#rhs";

/// Links a rule-side pattern to the agent it mentions.
pub const RBMO_AGENT: &str = "http://purl.org/rbm/rbmo#agent";

/// Links a rule-side pattern to one site state.
pub const RBMO_STATE: &str = "http://purl.org/rbm/rbmo#state";

/// The binding partner slot of a site state.
pub const RBMO_BINDING: &str = "http://purl.org/rbm/rbmo#binding";

/// The site a state refers to.
pub const RBMO_SITE: &str = "http://purl.org/rbm/rbmo#site";

/// The distinguished "unbound" value of a binding slot.
pub const RBMO_NOTHING: &str = "http://purl.org/rbm/rbmo#Nothing";

/// Direct display label.
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// Direct title, the second label choice.
pub const DCT_TITLE: &str = "http://purl.org/dc/terms/title";

/// "Is equivalent to" biology qualifier; links a model resource to its
/// external annotation resource.
pub const BQBIOL_IS: &str = "http://biomodels.net/biology-qualifiers/is";

/// Nucleotide sequence; used as a last-resort display label.
pub const SBOL_NUCLEOTIDES: &str = "http://sbols.org/v1#nucleotides";

/// Physical-entity classification, the sole source of biological types.
pub const BIOPAX_PHYSICAL_ENTITY: &str =
    "http://www.biopax.org/release/biopax-level3.owl#physicalEntity";

/// `rdf:type`, produced by the Turtle `a` keyword.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
