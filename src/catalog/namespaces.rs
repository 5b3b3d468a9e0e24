//! Namespace prefixes and IRI abbreviation.
//!
//! Element names in the catalog are namespace-qualified (`dcterms:title`).
//! Names derived from the graph, such as blank-node types and predicates, are
//! obtained by shrinking their IRI against a table of well-known prefixes.

use std::collections::BTreeMap;

use oxrdf::NamedNodeRef;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const VCARD: &str = "http://www.w3.org/2006/vcard/ns#";
pub const SCHEMA: &str = "http://schema.org/";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Prefixes declared on the root element of every catalog, in order.
pub const ROOT_PREFIXES: [&str; 4] = ["rdf", "dcat", "dcterms", "vcard"];

/// Well-known prefixes used to abbreviate IRIs found in the graph.
const WELL_KNOWN: &[(&str, &str)] = &[
    ("rdf", RDF),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("dcat", DCAT),
    ("dcterms", DCTERMS),
    ("dc11", "http://purl.org/dc/elements/1.1/"),
    ("vcard", VCARD),
    ("schema", SCHEMA),
    ("skos", SKOS),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("time", "http://www.w3.org/2006/time#"),
    ("locn", "http://www.w3.org/ns/locn#"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("adms", "http://www.w3.org/ns/adms#"),
    ("org", "http://www.w3.org/ns/org#"),
    ("void", "http://rdfs.org/ns/void#"),
    ("dqv", "http://www.w3.org/ns/dqv#"),
    ("odrl", "http://www.w3.org/ns/odrl/2/"),
    ("spdx", "http://spdx.org/rdf/terms#"),
    ("geo", "http://www.opengis.net/ont/geosparql#"),
    ("hydra", "http://www.w3.org/ns/hydra/core#"),
    ("sh", "http://www.w3.org/ns/shacl#"),
    ("qudt", "http://qudt.org/schema/qudt/"),
    ("cube", "https://cube.link/"),
    ("meta", "https://cube.link/meta/"),
];

/// Bidirectional prefix table.
#[derive(Debug, Clone)]
pub struct Namespaces {
    /// Map from prefix to namespace (e.g., "dcterms" -> "http://purl.org/dc/terms/")
    prefixes: BTreeMap<String, String>,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::well_known()
    }
}

impl Namespaces {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            prefixes: BTreeMap::new(),
        }
    }

    /// Creates a table holding the well-known vocabularies.
    pub fn well_known() -> Self {
        WELL_KNOWN
            .iter()
            .fold(Self::new(), |table, (prefix, namespace)| {
                table.with_prefix(prefix, namespace)
            })
    }

    /// Adds or replaces a prefix.
    pub fn with_prefix(mut self, prefix: &str, namespace: &str) -> Self {
        self.prefixes.insert(prefix.to_string(), namespace.to_string());
        self
    }

    /// Returns the namespace bound to `prefix`.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Abbreviates an IRI to `prefix:local`.
    ///
    /// The longest matching namespace wins. Returns `None` when no namespace
    /// matches or when the remainder is not usable as an XML local name.
    pub fn shrink(&self, iri: &str) -> Option<String> {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, namespace) in &self.prefixes {
            if iri.starts_with(namespace.as_str())
                && best.map_or(true, |(_, current)| namespace.len() > current.len())
            {
                best = Some((prefix, namespace));
            }
        }

        let (prefix, namespace) = best?;
        let local = &iri[namespace.len()..];
        if !is_local_name(local) {
            return None;
        }
        Some(format!("{}:{}", prefix, local))
    }

    /// Abbreviates a named node; see [`Namespaces::shrink`].
    pub fn shrink_node(&self, node: NamedNodeRef<'_>) -> Option<String> {
        self.shrink(node.as_str())
    }
}

/// Checks that `local` can follow a prefix in an XML element name.
fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Returns the prefix part of a qualified name, if any.
pub(crate) fn prefix_of(qualified_name: &str) -> Option<&str> {
    qualified_name.split_once(':').map(|(prefix, _)| prefix)
}
