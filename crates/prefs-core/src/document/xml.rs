//! XML reader and writer for [`Element`] trees, built on `quick-xml`.
//!
//! Output format:
//! ```text
//! <?xml version="1.0"?>
//! <root ...>
//!   children, each preceded by whatever the layout function asks for
//! </root>
//! ```
//! Elements without children are written in the empty-tag form `<name ... />`.
//! Whitespace between tags is purely cosmetic and is discarded on read.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{DocumentError, Element};

/// Where the writer is about to emit a tag, passed to the layout function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPosition {
    /// Before the opening (or empty) tag of an element.
    BeforeOpen,
    /// Before the closing tag of an element that has children.
    BeforeClose,
}

/// Decides the whitespace written before a tag, by element name.
pub type Layout = fn(name: &str, position: TagPosition) -> Option<&'static str>;

/// Deepest element nesting accepted on read.  The preferences document
/// needs four levels; anything far deeper is corrupt.
pub const MAX_DEPTH: usize = 16;

/// Layout that writes no whitespace at all.
pub fn compact(_name: &str, _position: TagPosition) -> Option<&'static str> {
    None
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Parses `bytes` into the tree rooted at the document's first element.
///
/// # Errors
///
/// - [`DocumentError::Utf8`] if the bytes are not UTF-8.
/// - [`DocumentError::Syntax`] for malformed markup, including mismatched
///   and unclosed tags.
/// - [`DocumentError::Syntax`] if elements nest deeper than [`MAX_DEPTH`].
/// - [`DocumentError::NoRootElement`] if no element is present.
pub fn parse(bytes: &[u8]) -> Result<Element, DocumentError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DocumentError::Utf8(e.to_string()))?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    // Open elements, innermost last.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::Syntax(e.to_string()))?;
        match event {
            Event::Start(start) => {
                check_depth(stack.len() + 1)?;
                stack.push(element_from_tag(&start)?);
            }
            Event::Empty(start) => {
                check_depth(stack.len() + 1)?;
                let element = element_from_tag(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(end) => {
                let name = utf8_name(end.name().as_ref())?;
                let element = stack.pop().ok_or_else(|| {
                    DocumentError::Syntax(format!("unexpected closing tag </{name}>"))
                })?;
                if element.name() != name {
                    return Err(DocumentError::Syntax(format!(
                        "closing tag </{name}> does not match <{}>",
                        element.name()
                    )));
                }
                attach(&mut stack, &mut root, element);
            }
            Event::Eof => break,
            // Declarations, comments, text, CDATA and processing instructions
            // carry nothing the preferences format uses.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocumentError::Syntax(format!("unclosed element <{}>", open.name())));
    }
    root.ok_or(DocumentError::NoRootElement)
}

fn check_depth(depth: usize) -> Result<(), DocumentError> {
    if depth > MAX_DEPTH {
        return Err(DocumentError::Syntax(format!(
            "elements nested deeper than {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}

/// Adds a completed element to its parent, or makes it the root.  Later
/// top-level elements are ignored once a root exists.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
        }
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn element_from_tag(start: &BytesStart<'_>) -> Result<Element, DocumentError> {
    let mut element = Element::new(utf8_name(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocumentError::Syntax(e.to_string()))?;
        let key = utf8_name(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| DocumentError::Syntax(e.to_string()))?;
        element.set_attr(key, value.into_owned());
    }
    Ok(element)
}

fn utf8_name(raw: &[u8]) -> Result<String, DocumentError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| DocumentError::Utf8(e.to_string()))
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Serializes `root` with an XML 1.0 declaration, asking `layout` for the
/// whitespace to place before each tag.
///
/// # Errors
///
/// Returns [`DocumentError::Write`] if the writer fails.
pub fn write(root: &Element, layout: Layout) -> Result<Vec<u8>, DocumentError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(|e| DocumentError::Write(e.to_string()))?;
    write_element(&mut writer, root, layout)?;
    Ok(writer.into_inner())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    layout: Layout,
) -> Result<(), DocumentError> {
    write_whitespace(writer, layout(element.name(), TagPosition::BeforeOpen))?;

    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.children().is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| DocumentError::Write(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| DocumentError::Write(e.to_string()))?;
    for child in element.children() {
        write_element(writer, child, layout)?;
    }
    write_whitespace(writer, layout(element.name(), TagPosition::BeforeClose))?;
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(|e| DocumentError::Write(e.to_string()))
}

fn write_whitespace(
    writer: &mut Writer<Vec<u8>>,
    whitespace: Option<&'static str>,
) -> Result<(), DocumentError> {
    match whitespace {
        Some(ws) => writer
            .write_event(Event::Text(BytesText::new(ws)))
            .map_err(|e| DocumentError::Write(e.to_string())),
        None => Ok(()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_nested_elements_and_attributes() {
        // Arrange
        let xml = br#"<?xml version="1.0"?>
<file app="Test" version="1.2.3">
  <section name="Audio">
    <setting name="soundvolume" value="120" description="Sound Volume"/>
  </section>
</file>"#;

        // Act
        let root = parse(xml).expect("valid XML must parse");

        // Assert
        assert_eq!(root.name(), "file");
        assert_eq!(root.attr("version"), Some("1.2.3"));
        let setting = root
            .find("setting", "name", Some("soundvolume"))
            .expect("setting must be present");
        assert_eq!(setting.attr("value"), Some("120"));
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let root = parse(br#"<file path="a &amp; b"/>"#).unwrap();
        assert_eq!(root.attr("path"), Some("a & b"));
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        let result = parse(b"<file><section></file>");
        assert!(matches!(result, Err(DocumentError::Syntax(_))));
    }

    #[test]
    fn test_parse_rejects_unclosed_root() {
        let result = parse(b"<file><section/>");
        assert!(matches!(result, Err(DocumentError::Syntax(_))));
    }

    #[test]
    fn test_parse_accepts_nesting_at_depth_limit() {
        let xml = format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert!(parse(xml.as_bytes()).is_ok());
    }

    #[test]
    fn test_parse_rejects_nesting_past_depth_limit() {
        let open = "<a>".repeat(MAX_DEPTH);
        let xml = format!("{open}<leaf/>{}", "</a>".repeat(MAX_DEPTH));

        let result = parse(xml.as_bytes());

        assert!(matches!(result, Err(DocumentError::Syntax(_))));
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        let result = parse(b"this is not markup");
        assert_eq!(result, Err(DocumentError::NoRootElement));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let result = parse(&[0x3C, 0xFF, 0xFE, 0x3E]);
        assert!(matches!(result, Err(DocumentError::Utf8(_))));
    }

    #[test]
    fn test_write_uses_empty_tags_for_leaf_elements() {
        let mut root = Element::new("file");
        root.push(Element::new("setting").with_attr("name", "x"));

        let bytes = write(&root, compact).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(r#"<?xml version="1.0"?>"#));
        assert!(text.contains(r#"<setting name="x"/>"#));
        assert!(text.ends_with("</file>"));
    }

    #[test]
    fn test_write_applies_layout_whitespace() {
        fn indent(name: &str, position: TagPosition) -> Option<&'static str> {
            match (name, position) {
                ("child", TagPosition::BeforeOpen) => Some("\n\t"),
                ("file", TagPosition::BeforeClose) => Some("\n"),
                _ => None,
            }
        }
        let mut root = Element::new("file");
        root.push(Element::new("child"));

        let text = String::from_utf8(write(&root, indent).unwrap()).unwrap();

        assert!(text.contains("<file>\n\t<child/>\n</file>"));
    }

    #[test]
    fn test_written_document_parses_back_to_same_tree() {
        let mut root = Element::new("file").with_attr("app", "A & B <test>");
        let section = root.push(Element::new("section").with_attr("name", "Menu"));
        section.push(Element::new("setting").with_attr("value", "\"quoted\""));

        let bytes = write(&root, compact).unwrap();
        let parsed = parse(&bytes).unwrap();

        assert_eq!(parsed, root);
    }
}
