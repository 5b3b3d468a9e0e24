//! Assembly of the catalog document.
//!
//! The document has the shape CKAN's DCAT harvester expects:
//!
//! ```text
//! rdf:RDF
//! └── dcat:Catalog
//!     └── dcat:dataset            (one per exported dataset)
//!         └── dcat:Dataset rdf:about="…"
//!             ├── dcterms:identifier, dcterms:title, …
//!             └── dcat:distribution
//!                 └── dcat:Distribution
//! ```

use std::collections::BTreeSet;

use oxrdf::{NamedNode, NamedNodeRef, Term};

use super::document::{CatalogDocument, Element};
use super::namespaces::{self, Namespaces, ROOT_PREFIXES};
use super::rdf::term::lexical_value;
use super::rdf::{CatalogError, Graph, GraphSource, GraphView};
use super::rules::{self, Eligibility, FormatCode};
use super::serialize::TermSerializer;
use super::vocab::{dcat, dcterms, schema};

/// Where the values of a dataset field come from.
#[derive(Debug, Clone, Copy)]
enum Field {
    /// Every object of the predicate.
    Property(NamedNodeRef<'static>),
    /// Only the language-tagged `dcat:keyword` objects.
    Keywords,
}

impl Field {
    fn values<'a>(self, dataset: &GraphView<'a>) -> Vec<&'a Term> {
        match self {
            Field::Property(predicate) => dataset.out(predicate),
            Field::Keywords => rules::language_tagged_keywords(dataset),
        }
    }
}

/// Dataset fields following the identifier, in output order.
const DATASET_FIELDS: [(&str, Field); 17] = [
    ("dcterms:title", Field::Property(dcterms::TITLE)),
    ("dcterms:description", Field::Property(dcterms::DESCRIPTION)),
    ("dcterms:license", Field::Property(dcterms::LICENSE)),
    ("dcterms:issued", Field::Property(dcterms::ISSUED)),
    ("dcterms:modified", Field::Property(dcterms::MODIFIED)),
    ("dcterms:publisher", Field::Property(dcterms::PUBLISHER)),
    ("dcterms:creator", Field::Property(dcterms::CREATOR)),
    ("dcat:contactPoint", Field::Property(dcat::CONTACT_POINT)),
    ("dcat:theme", Field::Property(dcat::THEME)),
    ("dcterms:language", Field::Property(dcterms::LANGUAGE)),
    ("dcterms:relation", Field::Property(dcterms::RELATION)),
    ("dcat:keyword", Field::Keywords),
    ("dcat:landingPage", Field::Property(dcat::LANDING_PAGE)),
    ("dcterms:spatial", Field::Property(dcterms::SPATIAL)),
    ("dcterms:coverage", Field::Property(dcterms::COVERAGE)),
    ("dcterms:temporal", Field::Property(dcterms::TEMPORAL)),
    ("dcterms:accrualPeriodicity", Field::Property(dcterms::ACCRUAL_PERIODICITY)),
];

/// Builds the catalog for every `dcat:Dataset` in `graph`.
///
/// Datasets without exactly one non-empty identifier are skipped with a
/// warning; the remaining ones keep the order in which their type statement
/// appears.
///
/// # Errors
///
/// Returns `CatalogError::MissingCreator` if an exported dataset needs a
/// creator-derived identifier and has no creator.
pub fn build_catalog(graph: &Graph) -> Result<CatalogDocument, CatalogError> {
    build_catalog_with(graph, &Namespaces::well_known())
}

/// Builds the catalog, abbreviating blank-node names with `namespaces`.
pub fn build_catalog_with(graph: &Graph, namespaces: &Namespaces) -> Result<CatalogDocument, CatalogError> {
    let serializer = TermSerializer::new(graph, namespaces);
    let mut catalog = Element::new("dcat:Catalog");
    let mut excluded = 0;

    for subject in graph.subjects_of_type(dcat::DATASET) {
        let dataset = graph.view(subject);
        match rules::check_eligibility(&dataset) {
            Eligibility::Eligible { identifier } => {
                let element = dataset_element(&dataset, lexical_value(identifier), &serializer)?;
                catalog.push_child(Element::new("dcat:dataset").with_child(element));
            }
            Eligibility::Excluded(reason) => {
                log::warn!("Ignoring dataset {} because {}", dataset.value(), reason);
                excluded += 1;
            }
        }
    }

    log::debug!(
        "Built catalog with {} datasets, {} excluded",
        catalog.children().len(),
        excluded
    );

    Ok(CatalogDocument::new(root_element(catalog, namespaces)))
}

/// Fetches the graph of `organization` from `source` and builds its catalog.
pub fn export_organization<S>(source: &S, organization: &NamedNode) -> Result<CatalogDocument, CatalogError>
where
    S: GraphSource + ?Sized,
{
    let graph = source.fetch_graph(organization)?;
    log::debug!("Fetched {} statements for {}", graph.len(), organization.as_str());
    build_catalog(&graph)
}

fn dataset_element(
    dataset: &GraphView<'_>,
    raw_identifier: &str,
    serializer: &TermSerializer<'_>,
) -> Result<Element, CatalogError> {
    let identifier = rules::derive_identifier(raw_identifier, dataset)?;

    let mut element = Element::new("dcat:Dataset")
        .with_attribute("rdf:about", dataset.value())
        .with_child(Element::new("dcterms:identifier").with_text(identifier));

    for (name, field) in DATASET_FIELDS {
        element = element.with_children(serializer.property(name, &field.values(dataset)));
    }

    for work_example in rules::distributions(dataset) {
        element.push_child(
            Element::new("dcat:distribution")
                .with_child(distribution_element(dataset, &work_example, serializer)),
        );
    }

    Ok(element)
}

fn distribution_element(
    dataset: &GraphView<'_>,
    work_example: &GraphView<'_>,
    serializer: &TermSerializer<'_>,
) -> Element {
    Element::new("dcat:Distribution")
        .with_children(serializer.property("dcterms:issued", &dataset.out(dcterms::ISSUED)))
        .with_children(
            serializer.property("dcat:mediaType", &work_example.out(schema::ENCODING_FORMAT)),
        )
        .with_children(serializer.property("dcat:accessURL", &work_example.out(schema::URL)))
        .with_children(serializer.property("dcterms:title", &work_example.out(schema::NAME)))
        .with_child(Element::new("dcterms:format").with_text(FormatCode::of(work_example).as_str()))
}

/// Wraps the catalog in `rdf:RDF`, declaring the root prefixes and any other
/// known prefix the catalog uses.
fn root_element(catalog: Element, namespaces: &Namespaces) -> Element {
    let mut used = BTreeSet::new();
    catalog.visit_names(&mut |name| {
        if let Some(prefix) = namespaces::prefix_of(name) {
            if prefix != "xml" && !ROOT_PREFIXES.contains(&prefix) {
                used.insert(prefix.to_string());
            }
        }
    });

    let mut root = Element::new("rdf:RDF");
    for prefix in ROOT_PREFIXES.iter().copied().map(str::to_string).chain(used) {
        if let Some(namespace) = namespaces.namespace(&prefix) {
            root = root.with_attribute(format!("xmlns:{}", prefix), namespace);
        }
    }
    root.with_child(catalog)
}
