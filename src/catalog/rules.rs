//! Which datasets are exported, and the fields derived for them.

use std::fmt;

use oxrdf::Term;

use super::rdf::{lexical_value, CatalogError, GraphView};
use super::vocab::{dcat, dcterms, schema};

/// Marker separating the dataset part from the organization part of a CKAN
/// identifier.
pub const IDENTIFIER_MARKER: char = '@';

/// Outcome of the identifier check for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility<'a> {
    /// The dataset has exactly one identifier and is exported.
    Eligible { identifier: &'a Term },
    /// The dataset is left out of the catalog.
    Excluded(ExclusionReason),
}

/// Why a dataset was left out of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    MissingIdentifier,
    EmptyIdentifier,
    MultipleIdentifiers(usize),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingIdentifier => write!(f, "it has no identifier"),
            ExclusionReason::EmptyIdentifier => write!(f, "its identifier is empty"),
            ExclusionReason::MultipleIdentifiers(count) => {
                write!(f, "it has {} identifiers", count)
            }
        }
    }
}

/// Checks that a dataset has exactly one non-empty `dcterms:identifier`.
pub fn check_eligibility<'a>(dataset: &GraphView<'a>) -> Eligibility<'a> {
    match dataset.out(dcterms::IDENTIFIER).as_slice() {
        [] => Eligibility::Excluded(ExclusionReason::MissingIdentifier),
        [identifier] if lexical_value(identifier).is_empty() => {
            Eligibility::Excluded(ExclusionReason::EmptyIdentifier)
        }
        [identifier] => Eligibility::Eligible {
            identifier: *identifier,
        },
        identifiers => Eligibility::Excluded(ExclusionReason::MultipleIdentifiers(identifiers.len())),
    }
}

/// Builds the CKAN identifier of a dataset.
///
/// An identifier already containing `@` is kept as is. Otherwise the last path
/// segment of the first creator is appended: `123` created by
/// `https://example.org/org/acme` becomes `123@acme`.
///
/// # Errors
///
/// Returns `CatalogError::MissingCreator` if a suffix is needed and the
/// dataset has no creator.
pub fn derive_identifier(raw: &str, dataset: &GraphView<'_>) -> Result<String, CatalogError> {
    if raw.contains(IDENTIFIER_MARKER) {
        return Ok(raw.to_string());
    }

    let creators = dataset.out_values(dcterms::CREATOR);
    let creator = creators
        .first()
        .ok_or_else(|| CatalogError::MissingCreator(dataset.value().to_string()))?;

    Ok(format!("{}{}{}", raw, IDENTIFIER_MARKER, creator_slug(creator)))
}

/// Returns the text after the last `/` of a creator IRI.
pub fn creator_slug(creator: &str) -> &str {
    creator.rsplit('/').next().unwrap_or(creator)
}

/// Returns the dataset keywords that carry a language tag.
pub fn language_tagged_keywords<'a>(dataset: &GraphView<'a>) -> Vec<&'a Term> {
    dataset
        .out(dcat::KEYWORD)
        .into_iter()
        .filter(|term| matches!(term, Term::Literal(literal) if literal.language().is_some()))
        .collect()
}

/// Returns the work examples of a dataset that declare an encoding format.
pub fn distributions<'a>(dataset: &GraphView<'a>) -> Vec<GraphView<'a>> {
    dataset
        .out(schema::WORK_EXAMPLE)
        .into_iter()
        .filter_map(|term| GraphView::from_term(dataset.graph(), term))
        .filter(|work_example| !work_example.out(schema::ENCODING_FORMAT).is_empty())
        .collect()
}

/// The CKAN format code of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    Html,
    Service,
    Unknown,
}

impl FormatCode {
    /// Maps a declared encoding format, compared case-sensitively.
    pub fn from_encoding(encoding: Option<&str>) -> Self {
        match encoding {
            Some("text/html") => FormatCode::Html,
            Some("Application/Sparql-query") => FormatCode::Service,
            _ => FormatCode::Unknown,
        }
    }

    /// Maps the first encoding format of a work example.
    pub fn of(work_example: &GraphView<'_>) -> Self {
        let encodings = work_example.out_values(schema::ENCODING_FORMAT);
        Self::from_encoding(encodings.first().copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatCode::Html => "HTML",
            FormatCode::Service => "SERVICE",
            FormatCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
