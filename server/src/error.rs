use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ckancatalog::catalog::rdf::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Missing `organization` query param")]
    MissingOrganization,
    #[error("Invalid organization IRI `{0}`")]
    InvalidOrganization(String),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("Export task failed: `{0}`")]
    Task(#[from] tokio::task::JoinError),
    #[error("Io error: `{0}`")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingOrganization | ServerError::InvalidOrganization(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Catalog(_) | ServerError::Task(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Catalog export failed");
        }
        (status, self.to_string()).into_response()
    }
}
