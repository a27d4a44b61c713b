//! Core types for the parsed layout tree.

use formlet_error_reporting::SourceSpan;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed layout document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    /// The root element of the document.
    pub root: LayoutElement,

    /// Span of the entire document.
    pub span: SourceSpan,
}

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Text(TextNode),
    Element(LayoutElement),
}

/// Character data inside an element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    /// The text content (after unescaping XML entities).
    pub content: String,

    /// Whether the text came from a CDATA section.
    pub cdata: bool,

    pub span: SourceSpan,
}

/// An element with its namespace prefix, local name, attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutElement {
    /// Namespace prefix, if any (e.g., "ui" in `<ui:text>`).
    pub prefix: Option<String>,

    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Span of the qualified name in the start tag.
    pub name_span: SourceSpan,

    pub attributes: Attributes,

    pub children: Vec<LayoutNode>,

    /// Span of the entire element, start tag through end tag.
    pub span: SourceSpan,
}

impl LayoutElement {
    pub fn new(prefix: Option<String>, name: impl Into<String>) -> Self {
        Self {
            prefix,
            name: name.into(),
            name_span: SourceSpan::default(),
            attributes: Attributes::new(),
            children: Vec::new(),
            span: SourceSpan::default(),
        }
    }

    /// The name as written in the source, `prefix:name` or `name`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Whether this element lives in the namespace with the given prefix.
    pub fn in_namespace(&self, prefix: &str) -> bool {
        self.prefix.as_deref() == Some(prefix)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &LayoutElement> {
        self.children.iter().filter_map(|child| match child {
            LayoutNode::Element(element) => Some(element),
            LayoutNode::Text(_) => None,
        })
    }
}

/// Element attributes in document order.
///
/// Keys are qualified attribute names (`xmlns:ui`, `class`). Replacing an
/// existing key keeps its position; new keys are appended; removal keeps the
/// order of the remaining keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
