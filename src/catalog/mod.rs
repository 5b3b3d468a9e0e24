//! Conversion of an organization's dataset graph into a DCAT catalog.
//!
//! # Example
//!
//! ```ignore
//! use ckancatalog::catalog::build_catalog;
//! use ckancatalog::catalog::rdf::{parse_graph, RdfFormat};
//!
//! let graph = parse_graph(ntriples, RdfFormat::NTriples, None)?;
//! let document = build_catalog(&graph)?;
//! println!("{}", document.to_xml_string()?);
//! ```
//!
//! # Example: straight from a SPARQL endpoint
//!
//! ```ignore
//! use ckancatalog::catalog::export_organization;
//! use ckancatalog::catalog::rdf::SparqlGraphSourceBuilder;
//!
//! let source = SparqlGraphSourceBuilder::new("https://ld.admin.ch/query").build()?;
//! let organization = oxrdf::NamedNode::new("https://register.ld.admin.ch/opendataswiss/org/bafu")?;
//! let document = export_organization(&source, &organization)?;
//! ```

pub mod builder;
pub mod document;
pub mod namespaces;
pub mod rdf;
pub mod rules;
pub mod serialize;
pub mod vocab;

// Re-exports
pub use builder::{build_catalog, build_catalog_with, export_organization};
pub use document::{CatalogDocument, Element};
pub use namespaces::Namespaces;
pub use rules::{Eligibility, ExclusionReason, FormatCode};
pub use serialize::TermSerializer;
