//! Load-time errors.

use formlet_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, SourceSpan};
use thiserror::Error;

/// Result type alias for formlet operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that make a layout unusable. All of them surface from
/// [`Form::load`](crate::Form::load); validation failures are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The layout markup itself could not be parsed.
    #[error(transparent)]
    Xml(#[from] formlet_xml::Error),

    /// The document root is not the reserved form element.
    #[error("Root element must be <{expected}>, found <{found}>")]
    WrongRoot {
        expected: String,
        found: String,
        location: SourceSpan,
    },

    /// A form control that carries a value has no `name`.
    #[error("Element <{element}> needs a non-empty attribute \"name\"")]
    MissingName {
        element: String,
        location: SourceSpan,
    },
}

impl FormError {
    pub fn location(&self) -> Option<SourceSpan> {
        match self {
            FormError::Xml(err) => err.location(),
            FormError::WrongRoot { location, .. } | FormError::MissingName { location, .. } => {
                Some(*location)
            }
        }
    }

    /// Convert this error to a DiagnosticMessage with an F-1-* or F-2-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            FormError::Xml(err) => err.to_diagnostic(),
            FormError::WrongRoot {
                expected,
                found,
                location,
            } => DiagnosticMessageBuilder::error("Wrong Root Element")
                .with_code("F-2-1")
                .problem(format!("The layout root must be `{}`", expected))
                .add_detail(format!("Found `{}`", found))
                .with_location(*location)
                .add_hint(format!("Wrap the layout in `<{}>`?", expected))
                .build(),
            FormError::MissingName { element, location } => {
                DiagnosticMessageBuilder::error("Missing Element Name")
                    .with_code("F-2-2")
                    .problem(format!(
                        "Element `{}` needs a non-empty `name` attribute",
                        element
                    ))
                    .with_location(*location)
                    .add_hint("Only labels, messages and directives may omit `name`. Add one?")
                    .build()
            }
        }
    }
}
