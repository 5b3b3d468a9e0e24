//! Export DCAT dataset descriptions as a CKAN-compatible RDF/XML catalog.
//!
//! The entry points live in [`catalog`]: fetch (or parse) the statements of an
//! organization into a [`catalog::rdf::Graph`], then turn them into a
//! [`catalog::CatalogDocument`] with [`catalog::build_catalog`].

pub mod catalog;
