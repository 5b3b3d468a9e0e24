//! Example: Exporting an organization from a SPARQL endpoint
//!
//! Fetches the published datasets of an organization, optionally dumps the
//! fetched statements as Turtle, and prints the catalog.
//!
//! Run with:
//! ```bash
//! cargo run --example fetch_organization --features sparql -- \
//!     https://ld.admin.ch/query https://register.ld.admin.ch/opendataswiss/org/bafu
//! ```
//!
//! Set `DUMP_GRAPH=1` to print the fetched statements first.

#[cfg(feature = "sparql")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;

    use ckancatalog::catalog::build_catalog;
    use ckancatalog::catalog::rdf::{GraphSource, RdfFormat, SparqlGraphSourceBuilder};
    use oxrdf::NamedNode;

    let mut args = std::env::args().skip(1);
    let (Some(endpoint), Some(organization)) = (args.next(), args.next()) else {
        eprintln!("Usage: fetch_organization <sparql-endpoint> <organization-iri>");
        std::process::exit(2);
    };

    let source = SparqlGraphSourceBuilder::new(endpoint)
        .timeout(Duration::from_secs(60))
        .build()?;
    let organization = NamedNode::new(organization)?;

    let graph = source.fetch_graph(&organization)?;
    println!("Fetched {} statements from {}\n", graph.len(), source.endpoint());

    if std::env::var_os("DUMP_GRAPH").is_some() {
        println!("--- Turtle Format ---");
        println!("{}\n", graph.to_string(RdfFormat::Turtle)?);
    }

    let document = build_catalog(&graph)?;
    println!("--- Catalog ({} datasets) ---", document.datasets().count());
    println!("{}", document.to_xml_string()?);

    Ok(())
}

#[cfg(not(feature = "sparql"))]
fn main() {
    eprintln!("This example requires the 'sparql' feature.");
    eprintln!("Run with: cargo run --example fetch_organization --features sparql");
    std::process::exit(1);
}
