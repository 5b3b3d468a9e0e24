//! RDF plumbing for the catalog export.
//!
//! Statements are held in an insertion-ordered [`Graph`]; datasets and their
//! nested resources are traversed through read-only [`GraphView`] handles.
//!
//! # Feature Flag
//!
//! Fetching graphs from a SPARQL endpoint requires the `sparql` feature
//! (enabled by default):
//!
//! ```toml
//! [dependencies]
//! ckan-catalog-rs = { version = "0.1", features = ["sparql"] }
//! ```

pub mod error;
pub mod fetch;
pub mod graph;
pub mod rdf_io;
pub mod term;

// Re-exports
pub use error::CatalogError;
pub use fetch::{datasets_query, GraphSource};
#[cfg(feature = "sparql")]
pub use fetch::{SparqlGraphSource, SparqlGraphSourceBuilder};
pub use graph::{Graph, GraphView};
pub use rdf_io::{parse_graph, RdfFormat};
pub use term::{classify, lexical_value, LiteralParts, TermKind};
