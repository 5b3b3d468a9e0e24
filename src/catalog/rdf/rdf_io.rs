//! RDF parsing and serialization support for [`Graph`].
//!
//! Graph store responses are parsed with oxrdfio; named graph membership is
//! dropped on the way in.

use std::io::Write;

use oxrdf::{Quad, Triple};
use oxrdfio::{RdfFormat as OxRdfFormat, RdfParser, RdfSerializer};

use super::error::CatalogError;
use super::graph::Graph;

/// Supported RDF formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt), the format requested from SPARQL endpoints
    NTriples,
    /// N-Quads format (.nq)
    NQuads,
    /// RDF/XML format (.rdf, .xml)
    RdfXml,
}

impl RdfFormat {
    /// Converts this RdfFormat to the corresponding oxrdfio format.
    fn to_oxrdf_format(self) -> OxRdfFormat {
        match self {
            RdfFormat::Turtle => OxRdfFormat::Turtle,
            RdfFormat::NTriples => OxRdfFormat::NTriples,
            RdfFormat::NQuads => OxRdfFormat::NQuads,
            RdfFormat::RdfXml => OxRdfFormat::RdfXml,
        }
    }

    /// The media type to send in an `Accept` header for this format.
    pub fn media_type(self) -> &'static str {
        self.to_oxrdf_format().media_type()
    }

    /// Picks a format from a response `Content-Type`, ignoring parameters.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match OxRdfFormat::from_media_type(media_type)? {
            OxRdfFormat::Turtle => Some(RdfFormat::Turtle),
            OxRdfFormat::NTriples => Some(RdfFormat::NTriples),
            OxRdfFormat::NQuads => Some(RdfFormat::NQuads),
            OxRdfFormat::RdfXml => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

impl Graph {
    /// Writes the graph to the provided writer in the specified format.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Serialization` if writing fails.
    pub fn write<W: Write>(&self, writer: W, format: RdfFormat) -> Result<(), CatalogError> {
        let mut serializer = RdfSerializer::from_format(format.to_oxrdf_format()).for_writer(writer);

        for triple in self.iter() {
            serializer
                .serialize_triple(triple)
                .map_err(|e: std::io::Error| CatalogError::Serialization(e.to_string()))?;
        }

        serializer
            .finish()
            .map_err(|e: std::io::Error| CatalogError::Serialization(e.to_string()))?;

        Ok(())
    }

    /// Serializes the graph to a string in the specified format.
    pub fn to_string(&self, format: RdfFormat) -> Result<String, CatalogError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, format)?;

        String::from_utf8(buffer)
            .map_err(|e| CatalogError::Serialization(format!("Invalid UTF-8 in output: {}", e)))
    }
}

/// Parses RDF into a [`Graph`].
///
/// # Arguments
///
/// * `input` - The RDF data as a string
/// * `format` - The RDF format of the input
/// * `base` - Optional base IRI for resolving relative IRIs
///
/// # Errors
///
/// Returns `CatalogError::ParseError` if parsing fails.
///
/// # Example
///
/// ```ignore
/// use ckancatalog::catalog::rdf::{parse_graph, RdfFormat};
///
/// let graph = parse_graph(response_body, RdfFormat::NTriples, None)?;
/// println!("{} statements", graph.len());
/// ```
pub fn parse_graph(input: &str, format: RdfFormat, base: Option<&str>) -> Result<Graph, CatalogError> {
    let mut parser = RdfParser::from_format(format.to_oxrdf_format());

    if let Some(base_iri) = base {
        parser = parser
            .with_base_iri(base_iri)
            .map_err(|e| CatalogError::ParseError(format!("Invalid base IRI: {}", e)))?;
    }

    let mut graph = Graph::new();
    for quad in parser.for_reader(input.as_bytes()) {
        let quad: Quad = quad.map_err(|e| CatalogError::ParseError(e.to_string()))?;
        graph.insert(Triple {
            subject: quad.subject,
            predicate: quad.predicate,
            object: quad.object,
        });
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, NamedNode};

    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();

        let subject = NamedNode::new_unchecked("http://example.org/subject");
        let predicate = NamedNode::new_unchecked("http://example.org/predicate");
        let object = Literal::new_simple_literal("test value");

        graph.insert(Triple::new(subject, predicate, object));
        graph
    }

    #[test]
    fn test_write_ntriples() {
        let graph = create_test_graph();
        let ntriples = graph.to_string(RdfFormat::NTriples).unwrap();
        assert!(ntriples.contains("example.org"));
        assert!(ntriples.contains("test value"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        let result = graph.to_string(RdfFormat::Turtle);
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_ntriples() {
        let ntriples = r#"
<http://example.org/d> <http://purl.org/dc/terms/identifier> "123" .
<http://example.org/d> <http://www.w3.org/ns/dcat#keyword> "Luft"@de .
<http://example.org/d> <http://purl.org/dc/terms/temporal> _:t .
"#;
        let graph = parse_graph(ntriples, RdfFormat::NTriples, None).unwrap();
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_parse_nquads_drops_graph_names() {
        let nquads = r#"
<http://example.org/d> <http://purl.org/dc/terms/title> "A" <http://example.org/g1> .
<http://example.org/d> <http://purl.org/dc/terms/title> "A" <http://example.org/g2> .
"#;
        let graph = parse_graph(nquads, RdfFormat::NQuads, None).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_parse_turtle_with_base() {
        let turtle = r#"
            @prefix dcterms: <http://purl.org/dc/terms/> .
            <dataset/1> dcterms:identifier "1" .
        "#;
        let graph = parse_graph(turtle, RdfFormat::Turtle, Some("https://example.org/")).unwrap();
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.subject.to_string(), "<https://example.org/dataset/1>");
    }

    #[test]
    fn test_parse_rdf_invalid_format() {
        let invalid_turtle = "this is not valid turtle";
        let result = parse_graph(invalid_turtle, RdfFormat::Turtle, None);
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_media_type_roundtrip() {
        assert_eq!(
            RdfFormat::from_media_type("application/n-triples; charset=utf-8"),
            Some(RdfFormat::NTriples)
        );
        assert_eq!(RdfFormat::from_media_type("text/turtle"), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_media_type("application/json"), None);
        assert_eq!(RdfFormat::NTriples.media_type(), "application/n-triples");
    }
}
