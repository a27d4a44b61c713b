//! Span-tracked layout markup parsing for Formlet.
//!
//! This crate wraps [`quick-xml`] to turn a form layout into a typed tree of
//! [`LayoutNode`]s. Every element and text node remembers the byte range it
//! came from so load-time errors can point back into the layout source.
//!
//! # Overview
//!
//! - [`LayoutDocument`]: the parsed document and its root element
//! - [`LayoutNode`]: either a [`TextNode`] or a [`LayoutElement`]
//! - [`LayoutElement`]: namespace prefix, local name, ordered [`Attributes`]
//!   and children
//!
//! # Example
//!
//! ```rust
//! use formlet_xml::{parse, LayoutNode};
//!
//! let doc = parse(r#"<ui:form xmlns:ui="urn:formlet">
//!   <p>Name: <ui:text name="usn" required="required"/></p>
//! </ui:form>"#).unwrap();
//!
//! assert_eq!(doc.root.qualified_name(), "ui:form");
//! let p = doc.root.child_elements().next().unwrap();
//! assert_eq!(p.name, "p");
//! match &p.children[1] {
//!     LayoutNode::Element(text) => {
//!         assert_eq!(text.prefix.as_deref(), Some("ui"));
//!         assert_eq!(text.attr("name"), Some("usn"));
//!     }
//!     other => panic!("expected element, got {:?}", other),
//! }
//! ```

pub mod error;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use formlet_error_reporting::SourceSpan;
pub use parser::parse;
pub use types::{Attributes, LayoutDocument, LayoutElement, LayoutNode, TextNode};
