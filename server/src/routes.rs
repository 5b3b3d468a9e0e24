use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use ckancatalog::catalog::export_organization;
use ckancatalog::catalog::rdf::{GraphSource, RdfFormat};
use oxrdf::NamedNode;
use tracing::info;

use crate::error::ServerError;

/// Application state shared across handlers.
pub struct AppState {
    source: Arc<dyn GraphSource + Send + Sync>,
}

impl AppState {
    pub fn new(source: impl GraphSource + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            source: Arc::new(source),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ckan", get(handle_ckan))
        .route("/healthz", get(handle_health))
        .with_state(state)
}

/// Handle GET /ckan?organization=<iri>
async fn handle_ckan(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ServerError> {
    let organization = match params.get("organization") {
        Some(organization) if !organization.is_empty() => parse_organization(organization)?,
        _ => return Err(ServerError::MissingOrganization),
    };

    info!(organization = %organization.as_str(), "Exporting catalog");

    let source = Arc::clone(&state.source);
    let xml = tokio::task::spawn_blocking(move || {
        export_organization(source.as_ref(), &organization)?.to_xml_string()
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, RdfFormat::RdfXml.media_type())], xml))
}

/// Handle GET /healthz
async fn handle_health() -> &'static str {
    "OK"
}

fn parse_organization(organization: &str) -> Result<NamedNode, ServerError> {
    NamedNode::new(organization).map_err(|_| ServerError::InvalidOrganization(organization.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ckancatalog::catalog::rdf::{parse_graph, CatalogError, Graph};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const GRAPH: &str = r#"
        @prefix dcat: <http://www.w3.org/ns/dcat#> .
        @prefix dcterms: <http://purl.org/dc/terms/> .

        <https://example.org/dataset/1> a dcat:Dataset ;
            dcterms:identifier "1" ;
            dcterms:title "Air quality"@en ;
            dcterms:creator <https://example.org/org/acme> .
    "#;

    struct FailingSource;

    impl GraphSource for FailingSource {
        fn fetch_graph(&self, _organization: &NamedNode) -> Result<Graph, CatalogError> {
            Err(CatalogError::FetchFailed {
                endpoint: "https://example.org/query".to_string(),
                reason: "HTTP 503 Service Unavailable".to_string(),
            })
        }
    }

    fn app() -> Router {
        let graph = parse_graph(GRAPH, RdfFormat::Turtle, None).unwrap();
        router(AppState::new(graph))
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ckan_returns_catalog() {
        let (status, content_type, body) =
            send_get(app(), "/ckan?organization=https%3A%2F%2Fexample.org%2Forg%2Facme").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/rdf+xml"));
        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(body.contains("<dcterms:identifier>1@acme</dcterms:identifier>"));
        assert!(body.contains("rdf:about=\"https://example.org/dataset/1\""));
    }

    #[tokio::test]
    async fn test_ckan_requires_organization() {
        let (status, _, body) = send_get(app(), "/ckan").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Missing `organization` query param");

        let (status, _, _) = send_get(app(), "/ckan?organization=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ckan_rejects_invalid_iri() {
        let (status, _, body) = send_get(app(), "/ckan?organization=not%20an%20iri").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("not an iri"));
    }

    #[tokio::test]
    async fn test_ckan_reports_fetch_failure() {
        let app = router(AppState::new(FailingSource));
        let (status, _, body) =
            send_get(app, "/ckan?organization=https%3A%2F%2Fexample.org%2Forg%2Facme").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("503"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, _, body) = send_get(app(), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
