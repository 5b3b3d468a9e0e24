//! In-memory graph and traversal handles for catalog conversion.

use std::collections::HashMap;

use indexmap::IndexSet;
use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, NamedNodeRef, NamedOrBlankNode, Term, Triple};

/// The statements fetched for one organization.
///
/// Statements are deduplicated and keep the order in which they were first
/// inserted, so every traversal over the graph is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
    /// Positions in `triples` of the statements about each subject.
    by_subject: HashMap<NamedOrBlankNode, Vec<usize>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple to the graph. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let (index, inserted) = self.triples.insert_full(triple);
        if inserted {
            let subject = self.triples[index].subject.clone();
            self.by_subject.entry(subject).or_default().push(index);
        }
        inserted
    }

    /// Returns the number of triples in the graph.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph contains no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns an iterator over the triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Returns the statements whose subject is `subject`, in insertion order.
    pub fn statements_about(&self, subject: &NamedOrBlankNode) -> impl Iterator<Item = &Triple> + '_ {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(move |&index| &self.triples[index])
    }

    /// Returns the distinct subjects declared with `rdf:type class`, in the
    /// order their type statement was first seen.
    pub fn subjects_of_type(&self, class: NamedNodeRef<'_>) -> Vec<NamedOrBlankNode> {
        let mut subjects = IndexSet::new();
        for triple in &self.triples {
            if triple.predicate.as_ref() != rdf::TYPE {
                continue;
            }
            if let Term::NamedNode(object) = &triple.object {
                if object.as_ref() == class {
                    subjects.insert(triple.subject.clone());
                }
            }
        }
        subjects.into_iter().collect()
    }

    /// Returns a traversal handle rooted at `subject`.
    pub fn view(&self, subject: NamedOrBlankNode) -> GraphView<'_> {
        GraphView::new(self, subject)
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

/// A read-only traversal handle: a subject plus the graph it lives in.
///
/// Handles are cheap to create; recursive traversals create one per visited
/// node and share the backing graph by reference.
#[derive(Debug, Clone)]
pub struct GraphView<'a> {
    graph: &'a Graph,
    subject: NamedOrBlankNode,
}

impl<'a> GraphView<'a> {
    /// Creates a handle rooted at `subject`.
    pub fn new(graph: &'a Graph, subject: NamedOrBlankNode) -> Self {
        Self { graph, subject }
    }

    /// Creates a handle rooted at an object term. Literals cannot be
    /// traversed and yield `None`.
    pub fn from_term(graph: &'a Graph, term: &Term) -> Option<Self> {
        let subject = match term {
            Term::NamedNode(node) => NamedOrBlankNode::NamedNode(node.clone()),
            Term::BlankNode(node) => NamedOrBlankNode::BlankNode(node.clone()),
            Term::Literal(_) => return None,
        };
        Some(Self::new(graph, subject))
    }

    /// The node this handle is rooted at.
    pub fn subject(&self) -> &NamedOrBlankNode {
        &self.subject
    }

    /// The backing graph.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// The subject's IRI, or its blank node identifier.
    pub fn value(&self) -> &str {
        match &self.subject {
            NamedOrBlankNode::NamedNode(node) => node.as_str(),
            NamedOrBlankNode::BlankNode(node) => node.as_str(),
        }
    }

    /// Returns the objects bound to `predicate` on this subject.
    pub fn out(&self, predicate: NamedNodeRef<'_>) -> Vec<&'a Term> {
        self.graph
            .statements_about(&self.subject)
            .filter(|triple| triple.predicate.as_ref() == predicate)
            .map(|triple| &triple.object)
            .collect()
    }

    /// Returns the lexical values of the objects bound to `predicate`.
    pub fn out_values(&self, predicate: NamedNodeRef<'_>) -> Vec<&'a str> {
        self.out(predicate)
            .into_iter()
            .map(super::term::lexical_value)
            .collect()
    }

    /// Returns the distinct predicates used on this subject, first-seen first.
    pub fn predicates(&self) -> Vec<&'a NamedNode> {
        let predicates: IndexSet<&'a NamedNode> = self
            .graph
            .statements_about(&self.subject)
            .map(|triple| &triple.predicate)
            .collect();
        predicates.into_iter().collect()
    }
}
