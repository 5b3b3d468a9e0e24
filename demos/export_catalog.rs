//! Example: Building a CKAN catalog from Turtle
//!
//! This example parses a small dataset description, builds the DCAT catalog
//! and prints it as RDF/XML.
//!
//! Run with:
//! ```bash
//! cargo run --example export_catalog
//! ```

use ckancatalog::catalog::build_catalog;
use ckancatalog::catalog::rdf::{parse_graph, RdfFormat};

const DATASETS: &str = r#"
@prefix dcat: <http://www.w3.org/ns/dcat#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix schema: <http://schema.org/> .
@prefix vcard: <http://www.w3.org/2006/vcard/ns#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

<https://example.org/dataset/air-quality> a dcat:Dataset ;
    dcterms:identifier "air-quality" ;
    dcterms:title "Luftqualität"@de, "Air quality"@en ;
    dcterms:description "Hourly measurements of air pollutants."@en ;
    dcterms:issued "2020-05-01"^^xsd:date ;
    dcterms:creator <https://example.org/org/environment> ;
    dcat:contactPoint [
        a vcard:Organization ;
        vcard:fn "Air Quality Team" ;
        vcard:hasEmail "air@example.org"
    ] ;
    dcat:keyword "Luft"@de, "air"@en, "untagged" ;
    schema:workExample <https://ld.admin.ch/application/opendataswiss>,
        <https://example.org/dataset/air-quality/page> .

<https://example.org/dataset/air-quality/page>
    schema:encodingFormat "text/html" ;
    schema:url <https://example.org/air-quality> ;
    schema:name "Air quality portal"@en .

<https://example.org/dataset/no-identifier> a dcat:Dataset ;
    dcterms:title "Left out of the catalog"@en .
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let graph = parse_graph(DATASETS, RdfFormat::Turtle, None)?;
    println!("Parsed {} statements\n", graph.len());

    let document = build_catalog(&graph)?;
    println!("Exported {} datasets\n", document.datasets().count());

    println!("{}", document.to_xml_string()?);

    Ok(())
}
