//! Error reporting and diagnostic messages for Formlet.
//!
//! Load-time failures (malformed layout markup, a wrong root element, a
//! control without a name) and soft runtime problems (a validator that was
//! never registered, an unknown control kind) are all described with the
//! same structure:
//!
//! - [`DiagnosticMessage`]: code, title, kind, problem, details and hints
//! - [`DiagnosticMessageBuilder`]: tidy construction of messages
//! - [`SourceSpan`] / [`SourceContext`]: byte ranges into the layout source,
//!   used to draw an [`ariadne`] snippet when the source is available
//! - [`catalog`]: the table of stable `F-*` error codes
//!
//! # Example
//!
//! ```
//! use formlet_error_reporting::{DiagnosticMessageBuilder, SourceContext, SourceSpan};
//!
//! let layout = "<ui:form><ui:text/></ui:form>";
//! let msg = DiagnosticMessageBuilder::error("Missing Element Name")
//!     .with_code("F-2-2")
//!     .problem("Element `ui:text` needs a non-empty `name` attribute")
//!     .with_location(SourceSpan::new(9, 19))
//!     .build();
//!
//! let ctx = SourceContext::new("signup.xml", layout);
//! let text = msg.to_text(Some(&ctx));
//! assert!(text.contains("F-2-2"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;
pub mod span;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
pub use span::{SourceContext, SourceSpan};
