//! Minimal element tree for the preferences document.
//!
//! The codec builds an [`Element`] tree when encoding and searches one when
//! decoding; the [`xml`] sub-module converts between the tree and XML bytes.
//! Only elements and attributes are modelled because the preferences format
//! stores every value in an attribute.  Text content is dropped on read.

pub mod xml;

use thiserror::Error;

/// Errors produced while reading or writing an XML document.
#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    /// The bytes are not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Utf8(String),

    /// The XML is malformed (bad syntax, mismatched or unclosed tags).
    #[error("malformed XML: {0}")]
    Syntax(String),

    /// The document holds no element at all.
    #[error("document has no root element")]
    NoRootElement,

    /// The writer failed.
    #[error("failed to write XML: {0}")]
    Write(String),
}

/// One XML element: name, ordered attributes, ordered child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets `key` to `value`, replacing an existing attribute of the same name
    /// in place so attribute order stays stable.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Returns the value of attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Appends `child` and returns a mutable reference to it so callers can
    /// keep building beneath it.
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Depth-first search of this element and its descendants, in document
    /// order, for the first element called `name` that carries attribute
    /// `attr`.  When `value` is `Some`, the attribute must also equal it.
    pub fn find(&self, name: &str, attr: &str, value: Option<&str>) -> Option<&Element> {
        // Pending elements, next to visit last.
        let mut pending: Vec<&Element> = vec![self];
        while let Some(element) = pending.pop() {
            if element.matches(name, attr, value) {
                return Some(element);
            }
            pending.extend(element.children.iter().rev());
        }
        None
    }

    fn matches(&self, name: &str, attr: &str, value: Option<&str>) -> bool {
        self.name == name
            && match (self.attr(attr), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Element {
        let mut root = Element::new("file").with_attr("version", "1.0.0");
        let section = root.push(Element::new("section").with_attr("name", "Video"));
        section.push(Element::new("setting").with_attr("name", "zoomHor").with_attr("value", "1.00"));
        section.push(Element::new("setting").with_attr("name", "render").with_attr("value", "1"));
        root
    }

    #[test]
    fn test_find_matches_root_element() {
        let root = sample_tree();
        let found = root.find("file", "version", None).expect("root must match");
        assert_eq!(found.attr("version"), Some("1.0.0"));
    }

    #[test]
    fn test_find_descends_into_children_by_attribute_value() {
        let root = sample_tree();

        let found = root
            .find("setting", "name", Some("render"))
            .expect("render setting must be found");

        assert_eq!(found.attr("value"), Some("1"));
    }

    #[test]
    fn test_find_returns_none_when_attribute_value_differs() {
        let root = sample_tree();
        assert!(root.find("setting", "name", Some("zoomVert")).is_none());
    }

    #[test]
    fn test_find_returns_first_match_in_document_order() {
        // Arrange – a match nested in the first section precedes a shallower
        // match in the second
        let mut root = Element::new("file");
        let first = root.push(Element::new("section"));
        first
            .push(Element::new("group"))
            .push(Element::new("setting").with_attr("name", "x").with_attr("value", "deep"));
        root.push(Element::new("section"))
            .push(Element::new("setting").with_attr("name", "x").with_attr("value", "shallow"));

        // Act
        let found = root.find("setting", "name", Some("x")).expect("x must be found");

        // Assert
        assert_eq!(found.attr("value"), Some("deep"));
    }

    #[test]
    fn test_set_attr_replaces_existing_value_in_place() {
        let mut element = Element::new("setting")
            .with_attr("name", "a")
            .with_attr("value", "1");

        element.set_attr("name", "b");

        let attrs: Vec<_> = element.attributes().collect();
        assert_eq!(attrs, vec![("name", "b"), ("value", "1")]);
    }
}
