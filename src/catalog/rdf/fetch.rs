//! Fetching the dataset graph of an organization.
//!
//! # Example
//!
//! ```ignore
//! let source = SparqlGraphSourceBuilder::new("https://ld.admin.ch/query")
//!     .credentials("user", "secret")
//!     .build()?;
//! let graph = source.fetch_graph(&organization)?;
//! ```

use oxrdf::NamedNode;

use super::error::CatalogError;
use super::graph::Graph;

/// Anything able to produce the statements about an organization's datasets.
pub trait GraphSource {
    /// Returns every statement about the published datasets of `organization`,
    /// including the statements about their directly nested resources.
    fn fetch_graph(&self, organization: &NamedNode) -> Result<Graph, CatalogError>;
}

/// An in-memory graph is its own source; the organization is not used to
/// filter it.
impl GraphSource for Graph {
    fn fetch_graph(&self, _organization: &NamedNode) -> Result<Graph, CatalogError> {
        Ok(self.clone())
    }
}

/// Builds the CONSTRUCT query selecting the published, unexpired datasets of
/// `organization` together with their one-level nested resources, copyright
/// identifiers and frequency mappings.
pub fn datasets_query(organization: &NamedNode) -> String {
    format!(
        r#"PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX schema: <http://schema.org/>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>

CONSTRUCT {{
  ?dataset ?p ?o .
  ?o ?nestedP ?nestedO .
  ?copyright schema:identifier ?copyrightIdentifier .
  ?dataset dcterms:accrualPeriodicity ?accrualPeriodicityExactMatch .
}}
WHERE {{
  GRAPH ?graph {{
    ?dataset ?p ?o .

    ?dataset dcterms:creator {organization} .
    ?dataset schema:workExample <https://ld.admin.ch/application/opendataswiss> .
    ?dataset schema:creativeWorkStatus <https://ld.admin.ch/vocabulary/CreativeWorkStatus/Published> .

    FILTER ( NOT EXISTS {{ ?dataset schema:validThrough ?expiration1 . }} )
    FILTER ( NOT EXISTS {{ ?dataset schema:expires ?expiration2 . }} )

    OPTIONAL {{
      ?o ?nestedP ?nestedO .
      FILTER ( ?nestedP != <https://cube.link/observation> )
    }}

    OPTIONAL {{
      ?dataset dcterms:rights ?copyright .
      GRAPH ?copyrightGraph {{
        ?copyright schema:identifier ?copyrightIdentifier .
      }}
    }}

    OPTIONAL {{
      ?dataset dcterms:accrualPeriodicity ?accrualPeriodicity .
      GRAPH ?frequencyGraph {{
        ?accrualPeriodicity skos:exactMatch ?accrualPeriodicityExactMatch .
      }}
    }}
  }}
}}
"#,
        organization = organization
    )
}

#[cfg(feature = "sparql")]
pub use self::sparql::{SparqlGraphSource, SparqlGraphSourceBuilder};

#[cfg(feature = "sparql")]
mod sparql {
    use std::time::Duration;

    use oxrdf::NamedNode;

    use super::super::error::CatalogError;
    use super::super::graph::Graph;
    use super::super::rdf_io::{parse_graph, RdfFormat};
    use super::{datasets_query, GraphSource};

    const DEFAULT_USER_AGENT: &str = concat!("ckan-catalog-rs/", env!("CARGO_PKG_VERSION"));
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Builder for [`SparqlGraphSource`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let source = SparqlGraphSourceBuilder::new("https://ld.admin.ch/query")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// ```
    #[derive(Debug, Clone)]
    pub struct SparqlGraphSourceBuilder {
        endpoint: String,
        credentials: Option<(String, String)>,
        timeout: Duration,
        user_agent: String,
    }

    impl SparqlGraphSourceBuilder {
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self {
                endpoint: endpoint.into(),
                credentials: None,
                timeout: DEFAULT_TIMEOUT,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            }
        }

        /// Sends every query with HTTP basic authentication.
        pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
            self.credentials = Some((user.into(), password.into()));
            self
        }

        pub fn timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = user_agent.into();
            self
        }

        /// Creates the source and its HTTP client.
        ///
        /// Must not be called from within an async runtime.
        pub fn build(self) -> Result<SparqlGraphSource, CatalogError> {
            let client = reqwest::blocking::Client::builder()
                .user_agent(self.user_agent)
                .timeout(self.timeout)
                .build()
                .map_err(|e| CatalogError::FetchFailed {
                    endpoint: self.endpoint.clone(),
                    reason: format!("Failed to create HTTP client: {}", e),
                })?;

            Ok(SparqlGraphSource {
                endpoint: self.endpoint,
                credentials: self.credentials,
                client,
            })
        }
    }

    /// Queries a SPARQL endpoint with [`datasets_query`].
    #[derive(Debug, Clone)]
    pub struct SparqlGraphSource {
        endpoint: String,
        credentials: Option<(String, String)>,
        client: reqwest::blocking::Client,
    }

    impl SparqlGraphSource {
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn fetch_failed(&self, reason: String) -> CatalogError {
            CatalogError::FetchFailed {
                endpoint: self.endpoint.clone(),
                reason,
            }
        }
    }

    impl GraphSource for SparqlGraphSource {
        fn fetch_graph(&self, organization: &NamedNode) -> Result<Graph, CatalogError> {
            let query = datasets_query(organization);
            log::debug!("Querying {} for {}", self.endpoint, organization.as_str());

            let mut request = self
                .client
                .post(&self.endpoint)
                .header("Accept", RdfFormat::NTriples.media_type())
                .form(&[("query", query.as_str())]);
            if let Some((user, password)) = &self.credentials {
                request = request.basic_auth(user, Some(password));
            }

            let response = request.send().map_err(|e| self.fetch_failed(e.to_string()))?;

            if !response.status().is_success() {
                return Err(self.fetch_failed(format!("HTTP {}", response.status())));
            }

            let format = response_format(
                response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok()),
            );
            let body = response.text().map_err(|e| self.fetch_failed(e.to_string()))?;
            parse_graph(&body, format, None)
        }
    }

    /// Picks the parser for a response, falling back to the requested
    /// N-Triples when the endpoint sends no usable `Content-Type`.
    fn response_format(content_type: Option<&str>) -> RdfFormat {
        content_type
            .and_then(RdfFormat::from_media_type)
            .unwrap_or(RdfFormat::NTriples)
    }

}
