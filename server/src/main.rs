//! CKAN Catalog HTTP Server
//!
//! Serves the published datasets of an organization, read from a SPARQL
//! endpoint, as a DCAT catalog that CKAN's harvester can consume.
//!
//! # Endpoints
//!
//! - `GET /ckan?organization=<iri>` - RDF/XML catalog of the organization
//! - `GET /healthz` - Health check
//!
//! # Example
//!
//! ```bash
//! ckan-catalog-server \
//!   --endpoint https://ld.admin.ch/query \
//!   --listen 0.0.0.0:8080
//! ```

mod error;
mod routes;

use std::net::SocketAddr;
use std::time::Duration;

use ckancatalog::catalog::rdf::SparqlGraphSourceBuilder;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::error::ServerError;
use crate::routes::AppState;

/// CKAN Catalog HTTP Server
#[derive(Parser, Debug)]
#[command(name = "ckan-catalog-server")]
#[command(about = "HTTP server exporting DCAT datasets as a CKAN catalog")]
struct Args {
    /// SPARQL endpoint queried for the datasets
    #[arg(long, env = "SPARQL_ENDPOINT_URL")]
    endpoint: Url,

    /// User for the SPARQL endpoint
    #[arg(long, env = "SPARQL_USER")]
    user: Option<String>,

    /// Password for the SPARQL endpoint
    #[arg(long, env = "SPARQL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "CKAN_LISTEN")]
    listen: SocketAddr,

    /// Timeout of one SPARQL query in seconds
    #[arg(long, default_value = "30", env = "SPARQL_TIMEOUT_SECS")]
    timeout_secs: u64,
}

fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!(
        endpoint = %args.endpoint,
        listen = %args.listen,
        "Starting CKAN catalog server"
    );

    // The blocking HTTP client has to be created outside the async runtime.
    let mut source = SparqlGraphSourceBuilder::new(args.endpoint.as_str())
        .timeout(Duration::from_secs(args.timeout_secs));
    if let Some(user) = args.user {
        source = source.credentials(user, args.password.unwrap_or_default());
    }
    let state = AppState::new(source.build()?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(args.listen).await?;
        info!(address = %args.listen, "Server listening");

        axum::serve(listener, routes::router(state.clone()))
            .with_graceful_shutdown(shutdown_signal())
            .await
    })?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
