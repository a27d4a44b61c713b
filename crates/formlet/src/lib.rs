//! Declarative HTML forms.
//!
//! A form is described by a layout document: ordinary HTML mixed with
//! control elements in a reserved namespace (`ui` by default), under a
//! `<ui:form>` root. Loading the layout indexes its named controls; the
//! host then supplies the current request and asks whether the form was
//! submitted, whether it is valid, and for the rendered markup.
//!
//! ```
//! use formlet::{Form, MapTranslator, RequestData};
//!
//! let layout = r#"<ui:form>
//!   <form>
//!     <ui:messages/>
//!     <ui:label key="name" for="usn"/>
//!     <ui:text name="usn" id="usn" required=""/>
//!     <ui:submit name="go" value=":send"/>
//!   </form>
//! </ui:form>"#;
//!
//! let form = Form::load(layout)?
//!     .with_translator(MapTranslator::new().with("name", "Name").with("send", "Send"))
//!     .with_request(RequestData::new("/signup").with_param("go", "x").with_param("usn", "ada"));
//!
//! assert!(form.is_submitted());
//! assert!(form.is_valid());
//! assert!(form.to_markup().contains(r#"<input type="text" name="usn" id="usn" value="ada" />"#));
//! # Ok::<(), formlet::FormError>(())
//! ```
//!
//! Problems that do not make the layout unusable (a validator or
//! translation that is missing, an unknown control) never fail; they are
//! collected as warnings and available from [`Form::diagnostics`].

pub mod binding;
pub mod collab;
pub mod config;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod form;
pub mod kind;
mod render;
pub mod request;
mod validate;
pub mod value;

pub use binding::DataBinding;
pub use collab::{MapTranslator, Translator, Validator, ValidatorInput, ValidatorRegistry};
pub use config::FormOptions;
pub use diagnostics::DiagnosticCollector;
pub use element::FormElement;
pub use error::{FormError, Result};
pub use form::Form;
pub use kind::ControlKind;
pub use request::{RequestData, Value};
pub use value::{FieldValue, Resolved, lenient_int};

// Re-export the diagnostic types so hosts need not depend on them directly
pub use formlet_error_reporting::{DiagnosticKind, DiagnosticMessage, SourceContext, SourceSpan};
