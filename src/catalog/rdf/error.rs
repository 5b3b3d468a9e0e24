//! Error types for the catalog export.

use thiserror::Error;

/// Errors that abort a whole catalog export.
///
/// Problems local to one dataset (a missing or duplicated identifier) are not
/// errors; they are reported through [`crate::catalog::Eligibility`] and the
/// dataset is left out of the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The RDF input could not be parsed.
    #[error("Failed to parse RDF: {0}")]
    ParseError(String),

    /// The graph store could not be queried.
    #[error("Failed to fetch graph from {endpoint}: {reason}")]
    FetchFailed { endpoint: String, reason: String },

    /// A dataset needs a creator-derived identifier suffix but has no creator.
    #[error("Dataset {0} has no creator")]
    MissingCreator(String),

    /// Writing the XML document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<quick_xml::Error> for CatalogError {
    fn from(e: quick_xml::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
