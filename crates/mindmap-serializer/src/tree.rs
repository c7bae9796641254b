//! Owned element/attribute/text tree for XML documents.
//!
//! Parsing is strict about well-formedness: anything that is not a single,
//! properly nested root element is reported as
//! [`SerializerError::CorruptedFile`], and so is any character that XML 1.0
//! does not allow, raw or as a character reference. Comments, processing
//! instructions and the XML declaration are dropped, as is whitespace-only
//! text inside elements that also contain child elements.
//!
//! Writing strips characters XML 1.0 cannot represent (most C0 controls) and
//! emits carriage returns and tabs as character references so that parsers
//! do not normalize them away. Line feeds are referenced too inside
//! attribute values.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt;
use std::io::{self, Write};
use tracing::warn;

use crate::error::{SerializerError, SerializerResult};

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Unescaped character data (text or CDATA section)
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any previous value under the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn append_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Direct child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> + '_ {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Content of the first direct text child
    pub fn first_text(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        })
    }
}

/// A complete document: one root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTree {
    root: XmlElement,
}

impl XmlTree {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn into_root(self) -> XmlElement {
        self.root
    }

    /// Parse a well-formed XML document
    pub fn parse(xml: &str) -> SerializerResult<Self> {
        ensure_xml_chars(xml, 0)?;

        let mut reader = Reader::from_str(xml);
        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|err| corrupted(reader.buffer_position(), err))?;

            match event {
                Event::Start(start) => open.push(element_from_start(&start, position)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start, position)?;
                    close_element(&mut open, &mut root, element, position)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| corrupted(position, "closing tag without an open element"))?;
                    close_element(&mut open, &mut root, element, position)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|err| corrupted(position, err))?;
                    ensure_xml_chars(&text, position)?;
                    push_text(&mut open, text.into_owned(), position)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|err| corrupted(position, err))?;
                    push_text(&mut open, text, position)?;
                }
                Event::Eof => break,
                // Declaration, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(corrupted(
                reader.buffer_position(),
                format!("unexpected end of document inside <{}>", unclosed.name),
            ));
        }

        root.map(XmlTree::new)
            .ok_or_else(|| corrupted(reader.buffer_position(), "document has no root element"))
    }

    /// Write the document as indented UTF-8 XML with a declaration
    pub fn write_to<W: Write>(&self, inner: W) -> io::Result<()> {
        let mut writer = Writer::new_with_indent(inner, b' ', 4);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(io::Error::other)?;
        write_element(&mut writer, &self.root)?;
        writer.get_mut().write_all(b"\n")
    }

    pub fn to_xml_string(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(io::Error::other)
    }
}

fn corrupted(position: usize, detail: impl fmt::Display) -> SerializerError {
    SerializerError::CorruptedFile(format!("{detail} (at byte {position})"))
}

/// Whether `c` is allowed anywhere in an XML 1.0 document
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn ensure_xml_chars(text: &str, position: usize) -> SerializerResult<()> {
    match text.char_indices().find(|(_, c)| !is_xml_char(*c)) {
        Some((offset, c)) => Err(corrupted(
            position + offset,
            format!("character U+{:04X} is not allowed in XML", u32::from(c)),
        )),
        None => Ok(()),
    }
}

/// Entity-escape `raw` for output, dropping characters XML cannot carry
fn escape_content(raw: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    let mut stripped = 0usize;
    for c in escape(raw).chars() {
        match c {
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' if in_attribute => escaped.push_str("&#10;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => stripped += 1,
        }
    }
    if stripped > 0 {
        warn!(stripped, "Dropped characters that XML cannot represent");
    }
    escaped
}

fn element_from_start(start: &BytesStart<'_>, position: usize) -> SerializerResult<XmlElement> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|err| corrupted(position, err))?
        .to_string();
    let mut element = XmlElement::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| corrupted(position, err))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|err| corrupted(position, err))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|err| corrupted(position, err))?
            .into_owned();
        ensure_xml_chars(&value, position)?;
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn close_element(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    mut element: XmlElement,
    position: usize,
) -> SerializerResult<()> {
    // Indentation between child elements is not content
    if element.child_elements().next().is_some() {
        element
            .children
            .retain(|child| !matches!(child, XmlNode::Text(text) if text.trim().is_empty()));
    }

    match open.last_mut() {
        Some(parent) => {
            parent.append_child(element);
            Ok(())
        }
        None if root.is_some() => Err(corrupted(position, "more than one root element")),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn push_text(open: &mut [XmlElement], text: String, position: usize) -> SerializerResult<()> {
    match open.last_mut() {
        Some(parent) => {
            parent.append_text(text);
            Ok(())
        }
        // Whitespace around the root element is insignificant
        None if text.trim().is_empty() => Ok(()),
        None => Err(corrupted(position, "text outside the root element")),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> io::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        let value = escape_content(value, true);
        start.push_attribute((key.as_bytes(), value.as_bytes()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(io::Error::other);
    }

    writer.write_event(Event::Start(start)).map_err(io::Error::other)?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => {
                let text = BytesText::from_escaped(escape_content(text, false));
                writer.write_event(Event::Text(text)).map_err(io::Error::other)?;
            }
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_elements() {
        let tree = XmlTree::parse(
            r#"<?xml version="1.0"?>
            <!-- a comment -->
            <design version="1.0"><node index="1"><text>hi</text></node><extra/></design>"#,
        )
        .unwrap();

        let root = tree.root();
        assert_eq!(root.name(), "design");
        assert_eq!(root.attribute("version"), Some("1.0"));
        let names: Vec<_> = root.child_elements().map(XmlElement::name).collect();
        assert_eq!(names, vec!["node", "extra"]);

        let node = root.child_elements().next().unwrap();
        assert_eq!(node.attribute("index"), Some("1"));
        assert_eq!(node.child_elements().next().unwrap().first_text(), Some("hi"));
    }

    #[test]
    fn test_entities_are_unescaped() {
        let tree = XmlTree::parse(r#"<a k="&quot;x&quot; &amp; y"><b>1 &lt; 2 &gt; 0</b></a>"#).unwrap();
        assert_eq!(tree.root().attribute("k"), Some("\"x\" & y"));
        assert_eq!(
            tree.root().child_elements().next().unwrap().first_text(),
            Some("1 < 2 > 0")
        );
    }

    #[test]
    fn test_cdata_is_text() {
        let tree = XmlTree::parse("<a><![CDATA[<raw> & stuff]]></a>").unwrap();
        assert_eq!(tree.root().first_text(), Some("<raw> & stuff"));
    }

    #[test]
    fn test_corrupted_inputs() {
        let inputs = [
            "",
            "   ",
            "plain text",
            "<design><node></design>",
            "<design>",
            "<a/><b/>",
            "<a/>trailing",
            "</a>",
            "<a>&unknown;</a>",
            r#"<a x="1" x="2"/>"#,
        ];
        for input in inputs {
            match XmlTree::parse(input) {
                Err(SerializerError::CorruptedFile(_)) => {}
                other => panic!("Expected CorruptedFile for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_whitespace_only_leaf_text_is_kept() {
        let tree = XmlTree::parse("<a>\n  <b>   </b>\n</a>").unwrap();
        assert_eq!(tree.root().children().len(), 1);
        assert_eq!(tree.root().child_elements().next().unwrap().first_text(), Some("   "));
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut element = XmlElement::new("node");
        element.set_attribute("x", 1);
        element.set_attribute("x", 2);
        let attributes: Vec<_> = element.attributes().collect();
        assert_eq!(attributes, vec![("x", "2")]);
    }

    #[test]
    fn test_write_escapes_and_indents() {
        let mut root = XmlElement::new("design");
        root.set_attribute("version", "a\"b");
        let mut text = XmlElement::new("text");
        text.append_text("<&>");
        root.append_child(text);
        root.append_child(XmlElement::new("empty"));

        let xml = XmlTree::new(root.clone()).to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <design version=\"a&quot;b\">\n    \
             <text>&lt;&amp;&gt;</text>\n    \
             <empty/>\n\
             </design>\n"
        );

        assert_eq!(XmlTree::parse(&xml).unwrap().into_root(), root);
    }

    #[test]
    fn test_write_references_whitespace_controls() {
        let mut root = XmlElement::new("design");
        root.set_attribute("version", "1\t2\n3\r");
        let mut text = XmlElement::new("text");
        text.append_text("a\rb\tc\nd");
        root.append_child(text);

        let xml = XmlTree::new(root.clone()).to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <design version=\"1&#9;2&#10;3&#13;\">\n    \
             <text>a&#13;b&#9;c\nd</text>\n\
             </design>\n"
        );
        assert!(!xml.contains('\r'));
        assert!(!xml.contains('\t'));

        assert_eq!(XmlTree::parse(&xml).unwrap().into_root(), root);
    }

    #[test]
    fn test_write_strips_unrepresentable_chars() {
        let mut root = XmlElement::new("text");
        root.append_text("a\u{1}b\0c\u{1F}d\u{FFFE}e");
        root.set_attribute("k", "\u{B}v\u{C}");

        let xml = XmlTree::new(root).to_xml_string().unwrap();
        assert!(xml.ends_with("<text k=\"v\">abcde</text>\n"), "{xml}");
        assert!(xml.chars().all(is_xml_char));
    }

    #[test]
    fn test_parse_rejects_disallowed_chars() {
        let inputs = [
            "<a>x\u{1}y</a>",
            "<a>\0</a>",
            "<a k=\"\u{8}\"/>",
            "<a>&#1;</a>",
            "<a k=\"&#11;\"/>",
            "<a><![CDATA[\u{1B}]]></a>",
        ];
        for input in inputs {
            match XmlTree::parse(input) {
                Err(SerializerError::CorruptedFile(_)) => {}
                other => panic!("Expected CorruptedFile for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_is_xml_char() {
        for c in ['\t', '\n', '\r', ' ', 'é', '\u{FFFD}', '\u{1F600}'] {
            assert!(is_xml_char(c), "{c:?}");
        }
        for c in ['\0', '\u{1}', '\u{B}', '\u{C}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(c), "{c:?}");
        }
    }
}
