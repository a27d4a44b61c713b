//! The form engine: a loaded layout plus everything needed to evaluate it
//! against one request.

use crate::binding::DataBinding;
use crate::collab::{Translator, Validator, ValidatorRegistry};
use crate::config::FormOptions;
use crate::diagnostics::DiagnosticCollector;
use crate::element::{FormElement, index_elements};
use crate::error::{FormError, Result};
use crate::kind::ControlKind;
use crate::request::{RequestData, Value};
use crate::validate::Validation;
use formlet_error_reporting::{DiagnosticMessage, SourceSpan};
use formlet_xml::LayoutDocument;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// A form built from a layout document.
///
/// Loading parses the layout and indexes its named controls. The host then
/// attaches the request, bindings, predefined values and collaborators, and
/// asks whether the form was submitted, whether it is valid, and for its
/// rendered markup.
///
/// Submission state and validation results are computed once and cached for
/// the lifetime of the form (or until [`reload`](Self::reload)); changing the
/// request afterwards does not re-run them.
///
/// ```
/// use formlet::{Form, RequestData};
///
/// let layout = r#"<ui:form><ui:text name="usn" required=""/><ui:submit name="go"/></ui:form>"#;
/// let form = Form::load(layout)?
///     .with_request(RequestData::new("/").with_param("go", "1").with_param("usn", ""));
///
/// assert!(form.is_submitted());
/// assert!(!form.is_valid());
/// assert_eq!(form.messages(), ["Field \"usn\" may not be empty."]);
/// # Ok::<(), formlet::FormError>(())
/// ```
pub struct Form {
    pub(crate) options: FormOptions,
    pub(crate) document: LayoutDocument,
    pub(crate) elements: Vec<FormElement>,
    pub(crate) request: RequestData,
    pub(crate) bindings: HashMap<String, DataBinding>,
    pub(crate) predefined: HashMap<String, Value>,
    pub(crate) action: Option<String>,
    pub(crate) translator: Option<Box<dyn Translator>>,
    pub(crate) validators: ValidatorRegistry,
    pub(crate) diagnostics: DiagnosticCollector,
    submitted: OnceCell<bool>,
    validation: OnceCell<Validation>,
}

impl Form {
    /// Load a layout with the default options.
    pub fn load(source: &str) -> Result<Self> {
        Self::load_with_options(source, FormOptions::default())
    }

    pub fn load_with_options(source: &str, options: FormOptions) -> Result<Self> {
        let (document, elements) = build_index(source, &options)?;
        Ok(Self {
            options,
            document,
            elements,
            request: RequestData::default(),
            bindings: HashMap::new(),
            predefined: HashMap::new(),
            action: None,
            translator: None,
            validators: ValidatorRegistry::new(),
            diagnostics: DiagnosticCollector::new(),
            submitted: OnceCell::new(),
            validation: OnceCell::new(),
        })
    }

    /// Replace the layout, keeping request, bindings and collaborators.
    ///
    /// Cached submission and validation state is discarded. On error the
    /// form is left unchanged.
    pub fn reload(&mut self, source: &str) -> Result<()> {
        let (document, elements) = build_index(source, &self.options)?;
        self.document = document;
        self.elements = elements;
        self.submitted = OnceCell::new();
        self.validation = OnceCell::new();
        self.diagnostics.clear();
        Ok(())
    }

    pub fn with_request(mut self, request: RequestData) -> Self {
        self.request = request;
        self
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    pub fn with_validators(mut self, validators: ValidatorRegistry) -> Self {
        self.validators = validators;
        self
    }

    /// Register a single validator under `name`.
    pub fn with_validator(mut self, name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.validators.register_validator(name, validator);
        self
    }

    /// Register data referenced by `bind` or `var` attributes.
    pub fn register_binding(&mut self, name: impl Into<String>, data: impl Into<DataBinding>) {
        self.bindings.insert(name.into(), data.into());
    }

    /// Value shown for `name` while the form has not been submitted.
    pub fn set_predefined(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.predefined.insert(name.into(), value.into());
    }

    /// Override the `action` of the outermost `form` tag.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = Some(action.into());
    }

    pub fn request(&self) -> &RequestData {
        &self.request
    }

    /// Mutable access to the request. Changes do not affect cached
    /// submission or validation results.
    pub fn request_mut(&mut self) -> &mut RequestData {
        &mut self.request
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    /// Named controls in document order.
    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    /// The control named `name`. When names repeat, the last one wins.
    pub fn element(&self, name: &str) -> Option<&FormElement> {
        self.elements.iter().rev().find(|e| e.name == name)
    }

    pub fn binding(&self, name: &str) -> Option<&DataBinding> {
        self.bindings.get(name)
    }

    /// Whether the request carries the first submit control's name.
    ///
    /// A form without a submit control is never submitted. Computed once.
    pub fn is_submitted(&self) -> bool {
        *self.submitted.get_or_init(|| {
            let submitted = self
                .elements
                .iter()
                .find(|e| e.kind == ControlKind::Submit)
                .is_some_and(|submit| self.request.contains(&submit.name));
            tracing::debug!(submitted, "Resolved submission state");
            submitted
        })
    }

    /// Whether every control passes its validation rules.
    ///
    /// Always false for a form that was not submitted; in that case nothing
    /// is cached and no messages are produced. Otherwise computed once.
    pub fn is_valid(&self) -> bool {
        if !self.is_submitted() {
            return false;
        }
        self.validation.get_or_init(|| self.run_validation()).valid
    }

    /// Failure messages from the last validation, in element order.
    pub fn messages(&self) -> &[String] {
        self.validation
            .get()
            .map(|validation| validation.messages.as_slice())
            .unwrap_or_default()
    }

    /// Soft diagnostics (unknown validators, missing translations, ...)
    /// raised so far, sorted by source location.
    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.diagnostics.diagnostics()
    }

    pub(crate) fn warn(&self, code: &str, title: &str, problem: String, location: Option<SourceSpan>) {
        tracing::warn!(code, "{}", problem);
        self.diagnostics.warn_with_code(code, title, problem, location);
    }

    /// Look up the data binding an element refers to through `attribute`.
    pub(crate) fn bound(&self, attribute: Option<&str>, location: SourceSpan) -> Option<&DataBinding> {
        let name = attribute?;
        let binding = self.bindings.get(name);
        if binding.is_none() {
            self.warn(
                "F-3-6",
                "Unknown Data Binding",
                format!("No data binding is registered under `{}`", name),
                Some(location),
            );
        }
        binding
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("options", &self.options)
            .field("elements", &self.elements)
            .field("request", &self.request)
            .field("bindings", &self.bindings)
            .field("predefined", &self.predefined)
            .field("action", &self.action)
            .field("translator", &self.translator.is_some())
            .field("validators", &self.validators)
            .finish_non_exhaustive()
    }
}

fn build_index(source: &str, options: &FormOptions) -> Result<(LayoutDocument, Vec<FormElement>)> {
    let document = formlet_xml::parse(source)?;
    let root = &document.root;
    if !root.in_namespace(&options.prefix) || root.name != options.root {
        return Err(FormError::WrongRoot {
            expected: options.root_name(),
            found: root.qualified_name(),
            location: root.name_span,
        });
    }
    let elements = index_elements(root, &options.prefix)?;
    Ok((document, elements))
}
