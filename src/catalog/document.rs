//! The catalog document tree and its XML serialization.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::rdf::CatalogError;

/// A namespace-qualified XML element.
///
/// Elements are plain data: a name, attributes in insertion order, child
/// elements and optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends a child element in place.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// True if the element has no attributes, children or text.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty() && self.text.is_none()
    }

    /// Returns the first child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns every child called `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Calls `visit` with the name of this element, of its attributes and of
    /// all descendants, depth first.
    pub(crate) fn visit_names(&self, visit: &mut impl FnMut(&str)) {
        visit(&self.name);
        for (key, _) in &self.attributes {
            visit(key);
        }
        for child in &self.children {
            child.visit_names(visit);
        }
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), CatalogError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            let value = xml_chars(&self.name, value);
            start.push_attribute((key.as_str(), &*value));
        }

        if self.children.is_empty() && self.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(&xml_chars(&self.name, text))))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;

        Ok(())
    }
}

/// Drops the characters XML 1.0 does not allow in a document, such as most
/// C0 control characters, which RDF literals may still carry.
fn xml_chars<'a>(element: &str, value: &'a str) -> Cow<'a, str> {
    if value.chars().all(is_xml_char) {
        return Cow::Borrowed(value);
    }
    log::warn!("Dropping characters not allowed in XML from {}", element);
    Cow::Owned(value.chars().filter(|c| is_xml_char(*c)).collect())
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// The exported catalog: an `rdf:RDF` root holding one `dcat:Catalog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDocument {
    root: Element,
}

impl CatalogDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the `dcat:Dataset` elements of the catalog, in document order.
    pub fn datasets(&self) -> impl Iterator<Item = &Element> {
        self.root
            .children_named("dcat:Catalog")
            .flat_map(|catalog| catalog.children_named("dcat:dataset"))
            .flat_map(|wrapper| wrapper.children_named("dcat:Dataset"))
    }

    /// Writes the document as indented XML, declaration included.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Serialization` if writing fails.
    pub fn write<W: Write>(&self, writer: W) -> Result<(), CatalogError> {
        let mut writer = Writer::new_with_indent(writer, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.root.write_to(&mut writer)?;
        writer
            .get_mut()
            .write_all(b"\n")
            .map_err(|e| CatalogError::Serialization(e.to_string()))?;
        Ok(())
    }

    /// Serializes the document to a string.
    pub fn to_xml_string(&self) -> Result<String, CatalogError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| CatalogError::Serialization(format!("Invalid UTF-8 in output: {}", e)))
    }
}
