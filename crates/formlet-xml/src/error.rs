//! Error types for layout parsing with source locations.

use formlet_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, SourceSpan};
use thiserror::Error;

/// Result type alias for formlet-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing layout markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Syntax error reported by quick-xml.
    #[error("XML syntax error: {message}{}", at_byte(.position))]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<usize>,
    },

    /// Input ended while an element was still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: String,
        location: Option<SourceSpan>,
    },

    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag {
        expected: String,
        found: String,
        location: Option<SourceSpan>,
    },

    #[error("Invalid XML structure: {message}")]
    InvalidStructure {
        message: String,
        location: Option<SourceSpan>,
    },

    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    #[error("Invalid XML: multiple root elements")]
    MultipleRoots { location: Option<SourceSpan> },
}

fn at_byte(position: &Option<usize>) -> String {
    position.map(|p| format!(" at byte {}", p)).unwrap_or_default()
}

impl Error {
    /// Where in the layout source this error points, if known.
    pub fn location(&self) -> Option<SourceSpan> {
        match self {
            Error::XmlSyntax { position, .. } => position.map(|p| SourceSpan::new(p, p + 1)),
            Error::UnexpectedEof { location, .. }
            | Error::MismatchedEndTag { location, .. }
            | Error::InvalidStructure { location, .. }
            | Error::MultipleRoots { location } => *location,
            Error::EmptyDocument => None,
        }
    }

    /// Convert this error to a DiagnosticMessage with the matching F-1-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        let builder = match self {
            Error::XmlSyntax { message, position } => {
                let mut builder = DiagnosticMessageBuilder::error("Layout Syntax Error")
                    .with_code("F-1-1")
                    .problem(message.clone());
                if let Some(pos) = position {
                    builder = builder.add_detail(format!("Error at byte offset {}", pos));
                }
                builder
            }
            Error::UnexpectedEof { expected, .. } => {
                DiagnosticMessageBuilder::error("Unexpected End of Layout")
                    .with_code("F-1-2")
                    .problem(format!(
                        "The layout ended unexpectedly; expected {}",
                        expected
                    ))
            }
            Error::MismatchedEndTag {
                expected, found, ..
            } => DiagnosticMessageBuilder::error("Mismatched End Tag")
                .with_code("F-1-3")
                .problem(format!(
                    "End tag </{}> does not match start tag <{}>",
                    found, expected
                ))
                .add_hint("Check that all opening tags have matching closing tags?"),
            Error::InvalidStructure { message, .. } => {
                DiagnosticMessageBuilder::error("Invalid Layout Structure")
                    .with_code("F-1-4")
                    .problem(message.clone())
            }
            Error::EmptyDocument => DiagnosticMessageBuilder::error("Empty Layout")
                .with_code("F-1-5")
                .problem("The layout contains no root element")
                .add_hint("Add a root form element to the layout?"),
            Error::MultipleRoots { .. } => DiagnosticMessageBuilder::error("Multiple Root Elements")
                .with_code("F-1-6")
                .problem("The layout contains multiple root elements")
                .add_hint("Wrap the layout in a single form element?"),
        };

        match self.location() {
            Some(location) => builder.with_location(location).build(),
            None => builder.build(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_includes_position() {
        let err = Error::XmlSyntax {
            message: "bad".to_string(),
            position: Some(12),
        };
        assert_eq!(err.to_string(), "XML syntax error: bad at byte 12");
    }

    #[test]
    fn test_diagnostic_codes() {
        assert_eq!(Error::EmptyDocument.to_diagnostic().code.as_deref(), Some("F-1-5"));
        let err = Error::MismatchedEndTag {
            expected: "p".to_string(),
            found: "div".to_string(),
            location: Some(SourceSpan::new(1, 2)),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code.as_deref(), Some("F-1-3"));
        assert_eq!(diag.location, Some(SourceSpan::new(1, 2)));
    }
}
