//! Layout parser that builds [`LayoutDocument`] trees.

use crate::error::{Error, Result};
use crate::types::{Attributes, LayoutDocument, LayoutElement, LayoutNode, TextNode};
use formlet_error_reporting::SourceSpan;
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse layout markup from a string.
///
/// # Example
///
/// ```rust
/// use formlet_xml::parse;
///
/// let doc = parse("<ui:form><br/></ui:form>").unwrap();
/// assert_eq!(doc.root.name, "form");
/// assert_eq!(doc.root.prefix.as_deref(), Some("ui"));
/// ```
///
/// # Errors
///
/// Returns an error if the markup is malformed, empty, or has more than one
/// root element.
pub fn parse(content: &str) -> Result<LayoutDocument> {
    let mut parser = LayoutParser::new(content);
    parser.parse()
}

/// Internal parser state.
struct LayoutParser<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,
}

/// An element whose end tag has not been seen yet.
struct BuildNode {
    prefix: Option<String>,
    name: String,
    name_span: SourceSpan,
    attributes: Attributes,

    /// Byte offset of the `<` that opened this element.
    start_offset: usize,

    children: Vec<LayoutNode>,
}

impl<'a> LayoutParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            source,
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<LayoutDocument> {
        let mut root: Option<LayoutElement> = None;

        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.handle_start(&e, event_start)?;
                    self.stack.push(node);
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let node = self.handle_start(&e, event_start)?;
                    let end_offset = self.reader.buffer_position() as usize;
                    let element = node.finish(end_offset);
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(e, event_start);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position() as usize),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", qualified(&node.prefix, &node.name)),
                location: Some(node.name_span),
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        Ok(LayoutDocument {
            root,
            span: SourceSpan::new(0, self.source.len()),
        })
    }

    /// Hand a finished element to its parent, or make it the document root.
    fn attach(&mut self, element: LayoutElement, root: &mut Option<LayoutElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(LayoutNode::Element(element));
                Ok(())
            }
            None if root.is_some() => Err(Error::MultipleRoots {
                location: Some(element.span),
            }),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }

    fn handle_start(&self, e: &BytesStart<'_>, event_start: usize) -> Result<BuildNode> {
        let (prefix, name) = split_name(e.name().as_ref());
        let name_start = event_start + 1; // Skip '<'
        let name_span = SourceSpan::new(name_start, name_start + e.name().as_ref().len());
        let attributes = self.parse_attributes(e, event_start)?;

        Ok(BuildNode {
            prefix,
            name,
            name_span,
            attributes,
            start_offset: event_start,
            children: Vec::new(),
        })
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<LayoutElement> {
        let (end_prefix, end_name) = split_name(e.name().as_ref());

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", qualified(&end_prefix, &end_name)),
            location: None,
        })?;

        if node.name != end_name || node.prefix != end_prefix {
            return Err(Error::MismatchedEndTag {
                expected: qualified(&node.prefix, &node.name),
                found: qualified(&end_prefix, &end_name),
                location: Some(node.name_span),
            });
        }

        let end_offset = self.reader.buffer_position() as usize;
        Ok(node.finish(end_offset))
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: usize) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(event_start),
        })?;

        // Whitespace between elements carries no meaning for rendering
        if text.trim().is_empty() {
            return Ok(());
        }

        let end_offset = self.reader.buffer_position() as usize;
        if let Some(node) = self.stack.last_mut() {
            node.children.push(LayoutNode::Text(TextNode {
                content: text.into_owned(),
                cdata: false,
                span: SourceSpan::new(event_start, end_offset),
            }));
        }
        Ok(())
    }

    fn handle_cdata(&mut self, e: BytesCData<'_>, event_start: usize) {
        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
        let end_offset = self.reader.buffer_position() as usize;

        if let Some(node) = self.stack.last_mut() {
            node.children.push(LayoutNode::Text(TextNode {
                content: text,
                cdata: true,
                span: SourceSpan::new(event_start, end_offset),
            }));
        }
    }

    fn parse_attributes(&self, e: &BytesStart<'_>, tag_start: usize) -> Result<Attributes> {
        let mut attributes = Attributes::new();

        for attr_result in e.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("Invalid value for attribute '{}': {}", key, err),
                position: Some(tag_start),
            })?;
            attributes.set(key, value.into_owned());
        }

        Ok(attributes)
    }
}

impl BuildNode {
    fn finish(self, end_offset: usize) -> LayoutElement {
        LayoutElement {
            prefix: self.prefix,
            name: self.name,
            name_span: self.name_span,
            attributes: self.attributes,
            children: self.children,
            span: SourceSpan::new(self.start_offset, end_offset),
        }
    }
}

/// Split a raw qualified name into `(prefix, local_name)`.
fn split_name(raw: &[u8]) -> (Option<String>, String) {
    let full_name = String::from_utf8_lossy(raw);
    match full_name.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, full_name.into_owned()),
    }
}

fn qualified(prefix: &Option<String>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, name),
        None => name.to_string(),
    }
}
