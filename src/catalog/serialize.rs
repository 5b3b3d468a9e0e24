//! Mapping of RDF terms to catalog elements.
//!
//! Every term bound to a property becomes one element named after that
//! property:
//!
//! - a literal carries its value as text, plus `xml:lang` and `xml:datatype`
//!   attributes when it has a language tag or a datatype
//! - an IRI becomes an empty element with an `rdf:resource` attribute
//! - a typed blank node wraps one element named after its abbreviated type,
//!   holding one child per statement about the blank node, serialized
//!   recursively; an untyped blank node becomes an empty element
//!
//! Predicates of a blank node are visited in the order they first appear in
//! the graph.

use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedOrBlankNode, Term};

use super::document::Element;
use super::namespaces::Namespaces;
use super::rdf::term::{classify, lexical_value, LiteralParts, TermKind};
use super::rdf::{Graph, GraphView};

/// Serializes terms of one graph into elements.
#[derive(Debug, Clone, Copy)]
pub struct TermSerializer<'a> {
    graph: &'a Graph,
    namespaces: &'a Namespaces,
}

impl<'a> TermSerializer<'a> {
    pub fn new(graph: &'a Graph, namespaces: &'a Namespaces) -> Self {
        Self { graph, namespaces }
    }

    /// Serializes the terms bound to a property, one element per term.
    ///
    /// An unbound property still yields a single empty element.
    pub fn property(&self, name: &str, terms: &[&Term]) -> Vec<Element> {
        if terms.is_empty() {
            return vec![Element::new(name)];
        }
        let mut path = Vec::new();
        terms
            .iter()
            .map(|term| self.serialize_node(name, term, &mut path))
            .collect()
    }

    /// Serializes a single term into an element called `name`.
    pub fn node(&self, name: &str, term: &Term) -> Element {
        self.serialize_node(name, term, &mut Vec::new())
    }

    /// `path` holds the blank nodes currently being expanded, outermost first.
    fn serialize_node(&self, name: &str, term: &Term, path: &mut Vec<BlankNode>) -> Element {
        match term {
            Term::Literal(literal) => literal_node(name, LiteralParts::from(literal)),
            Term::NamedNode(node) => Element::new(name).with_attribute("rdf:resource", node.as_str()),
            Term::BlankNode(node) => self.blank_node(name, node, path),
        }
    }

    fn blank_node(&self, name: &str, node: &BlankNode, path: &mut Vec<BlankNode>) -> Element {
        let element = Element::new(name);

        if path.contains(node) {
            log::warn!(
                "Blank node _:{} references itself, serializing {} as empty",
                node.as_str(),
                name
            );
            return element;
        }

        let view = GraphView::new(self.graph, NamedOrBlankNode::BlankNode(node.clone()));
        let types = view.out(rdf::TYPE);
        if types.len() != 1 || classify(types[0]) != TermKind::Iri {
            return element;
        }
        let type_iri = lexical_value(types[0]);
        let Some(type_name) = self.namespaces.shrink(type_iri) else {
            log::warn!("No known prefix for type {}, serializing {} as empty", type_iri, name);
            return element;
        };

        path.push(node.clone());
        let mut resource = Element::new(type_name);
        for predicate in view.predicates() {
            if predicate.as_ref() == rdf::TYPE {
                continue;
            }
            let Some(predicate_name) = self.namespaces.shrink_node(predicate.as_ref()) else {
                log::warn!("No known prefix for predicate {}, skipping it", predicate.as_str());
                continue;
            };
            for value in view.out(predicate.as_ref()) {
                resource.push_child(self.serialize_node(&predicate_name, value, path));
            }
        }
        path.pop();

        element.with_child(resource)
    }
}

fn literal_node(name: &str, parts: LiteralParts<'_>) -> Element {
    let mut element = Element::new(name);
    if let Some(language) = parts.language {
        element = element.with_attribute("xml:lang", language);
    }
    if let Some(datatype) = parts.datatype {
        element = element.with_attribute("xml:datatype", datatype);
    }
    element.with_text(parts.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::rdf::{parse_graph, RdfFormat};
    use oxrdf::{Literal, NamedNode, NamedNodeRef};

    const TEMPORAL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/temporal");

    fn dataset_objects<'a>(graph: &'a Graph, predicate: NamedNodeRef<'_>) -> Vec<&'a Term> {
        let subject = NamedNode::new_unchecked("https://example.org/dataset/1");
        graph.view(subject.into()).out(predicate)
    }

    #[test]
    fn test_literal_with_language() {
        let graph = Graph::new();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let term = Term::Literal(Literal::new_language_tagged_literal_unchecked("Luft", "de"));
        let element = serializer.node("dcat:keyword", &term);

        assert_eq!(element.name(), "dcat:keyword");
        assert_eq!(element.text(), Some("Luft"));
        assert_eq!(element.attribute("xml:lang"), Some("de"));
        assert_eq!(
            element.attribute("xml:datatype"),
            Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString")
        );
        assert!(element.children().is_empty());
    }

    #[test]
    fn test_typed_literal() {
        let graph = Graph::new();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let term = Term::Literal(Literal::new_typed_literal(
            "2020-01-01",
            NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#date"),
        ));
        let element = serializer.node("dcterms:issued", &term);

        assert_eq!(element.attribute("xml:lang"), None);
        assert_eq!(
            element.attribute("xml:datatype"),
            Some("http://www.w3.org/2001/XMLSchema#date")
        );
        assert_eq!(element.text(), Some("2020-01-01"));
    }

    #[test]
    fn test_literal_without_language_or_datatype() {
        let element = literal_node(
            "dcterms:title",
            LiteralParts {
                value: "bare",
                language: None,
                datatype: None,
            },
        );
        assert!(element.attributes().is_empty());
        assert_eq!(element.text(), Some("bare"));
    }

    #[test]
    fn test_named_node() {
        let graph = Graph::new();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let term = Term::NamedNode(NamedNode::new_unchecked("https://example.org/license"));
        let element = serializer.node("dcterms:license", &term);

        assert_eq!(element.attribute("rdf:resource"), Some("https://example.org/license"));
        assert_eq!(element.text(), None);
        assert!(element.children().is_empty());
    }

    #[test]
    fn test_unbound_property_yields_one_empty_element() {
        let graph = Graph::new();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let elements = serializer.property("dcterms:title", &[]);
        assert_eq!(elements, vec![Element::new("dcterms:title")]);
    }

    #[test]
    fn test_one_element_per_term() {
        let graph = Graph::new();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let a = Term::Literal(Literal::new_simple_literal("a"));
        let b = Term::Literal(Literal::new_simple_literal("b"));
        let elements = serializer.property("dcterms:title", &[&a, &b]);

        let texts: Vec<_> = elements.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_typed_blank_node() {
        let turtle = r#"
            @prefix dcterms: <http://purl.org/dc/terms/> .
            @prefix dcat: <http://www.w3.org/ns/dcat#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

            <https://example.org/dataset/1> dcterms:temporal [
                a dcterms:PeriodOfTime ;
                dcat:startDate "2000-01-01"^^xsd:date ;
                dcat:endDate "2010-12-31"^^xsd:date
            ] .
        "#;
        let graph = parse_graph(turtle, RdfFormat::Turtle, None).unwrap();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let elements = serializer.property("dcterms:temporal", &dataset_objects(&graph, TEMPORAL));
        assert_eq!(elements.len(), 1);

        let period = elements[0].child("dcterms:PeriodOfTime").unwrap();
        let names: Vec<_> = period.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["dcat:startDate", "dcat:endDate"]);
        assert_eq!(period.children()[0].text(), Some("2000-01-01"));
    }

    #[test]
    fn test_nested_blank_nodes() {
        let turtle = r#"
            @prefix dcat: <http://www.w3.org/ns/dcat#> .
            @prefix vcard: <http://www.w3.org/2006/vcard/ns#> .

            <https://example.org/dataset/1> dcat:contactPoint [
                a vcard:Organization ;
                vcard:fn "Team" ;
                vcard:hasAddress [ a vcard:Address ; vcard:locality "Bern" ]
            ] .
        "#;
        let graph = parse_graph(turtle, RdfFormat::Turtle, None).unwrap();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);
        let contact_point = NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#contactPoint");

        let elements =
            serializer.property("dcat:contactPoint", &dataset_objects(&graph, contact_point));
        let address = elements[0]
            .child("vcard:Organization")
            .and_then(|org| org.child("vcard:hasAddress"))
            .and_then(|has_address| has_address.child("vcard:Address"))
            .unwrap();
        assert_eq!(address.child("vcard:locality").unwrap().text(), Some("Bern"));
    }

    #[test]
    fn test_untyped_blank_node_is_empty() {
        let turtle = r#"
            @prefix dcterms: <http://purl.org/dc/terms/> .
            <https://example.org/dataset/1> dcterms:temporal [ dcterms:title "no type" ] .
        "#;
        let graph = parse_graph(turtle, RdfFormat::Turtle, None).unwrap();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let elements = serializer.property("dcterms:temporal", &dataset_objects(&graph, TEMPORAL));
        assert_eq!(elements, vec![Element::new("dcterms:temporal")]);
    }

    #[test]
    fn test_blank_node_with_two_types_is_empty() {
        let turtle = r#"
            @prefix dcterms: <http://purl.org/dc/terms/> .
            <https://example.org/dataset/1> dcterms:temporal [
                a dcterms:PeriodOfTime, dcterms:Location
            ] .
        "#;
        let graph = parse_graph(turtle, RdfFormat::Turtle, None).unwrap();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let elements = serializer.property("dcterms:temporal", &dataset_objects(&graph, TEMPORAL));
        assert!(elements[0].is_empty());
    }

    #[test]
    fn test_unknown_prefix_predicate_is_skipped() {
        let turtle = r#"
            @prefix dcterms: <http://purl.org/dc/terms/> .
            <https://example.org/dataset/1> dcterms:temporal [
                a dcterms:PeriodOfTime ;
                <https://example.org/vocab#private> "hidden" ;
                dcterms:title "kept"
            ] .
        "#;
        let graph = parse_graph(turtle, RdfFormat::Turtle, None).unwrap();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let elements = serializer.property("dcterms:temporal", &dataset_objects(&graph, TEMPORAL));
        let period = elements[0].child("dcterms:PeriodOfTime").unwrap();
        assert_eq!(period.children().len(), 1);
        assert_eq!(period.children()[0].name(), "dcterms:title");
    }

    #[test]
    fn test_blank_node_cycle_terminates() {
        let ntriples = r#"
<https://example.org/dataset/1> <http://purl.org/dc/terms/temporal> _:a .
_:a <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/dc/terms/PeriodOfTime> .
_:a <http://purl.org/dc/terms/relation> _:b .
_:b <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/dc/terms/PeriodOfTime> .
_:b <http://purl.org/dc/terms/relation> _:a .
"#;
        let graph = parse_graph(ntriples, RdfFormat::NTriples, None).unwrap();
        let namespaces = Namespaces::well_known();
        let serializer = TermSerializer::new(&graph, &namespaces);

        let elements = serializer.property("dcterms:temporal", &dataset_objects(&graph, TEMPORAL));
        let inner = elements[0]
            .child("dcterms:PeriodOfTime")
            .and_then(|a| a.child("dcterms:relation"))
            .and_then(|relation| relation.child("dcterms:PeriodOfTime"))
            .and_then(|b| b.child("dcterms:relation"))
            .unwrap();
        assert!(inner.is_empty());
    }
}
