//! Classification of RDF terms.

use oxrdf::{Literal, Term};

/// The kind of an RDF term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// A plain, language-tagged or typed literal.
    Literal,
    /// An IRI resource.
    Iri,
    /// A blank node.
    BlankNode,
}

/// Returns the kind of a term.
pub fn classify(term: &Term) -> TermKind {
    match term {
        Term::Literal(_) => TermKind::Literal,
        Term::NamedNode(_) => TermKind::Iri,
        Term::BlankNode(_) => TermKind::BlankNode,
    }
}

/// Returns the lexical value of a term: the literal text, the IRI, or the
/// blank node's local identifier.
pub fn lexical_value(term: &Term) -> &str {
    match term {
        Term::Literal(literal) => literal.value(),
        Term::NamedNode(node) => node.as_str(),
        Term::BlankNode(node) => node.as_str(),
    }
}

/// The parts of a literal relevant to serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralParts<'a> {
    pub value: &'a str,
    pub language: Option<&'a str>,
    pub datatype: Option<&'a str>,
}

impl<'a> From<&'a Literal> for LiteralParts<'a> {
    fn from(literal: &'a Literal) -> Self {
        Self {
            value: literal.value(),
            language: literal.language(),
            datatype: Some(literal.datatype().as_str()),
        }
    }
}
