//! Validation of a submitted form.

use crate::collab::{Validator, ValidatorInput};
use crate::element::FormElement;
use crate::form::Form;
use crate::kind::ControlKind;
use crate::value::{is_integer_literal, lenient_int};

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Validation {
    pub valid: bool,
    pub messages: Vec<String>,
}

impl Validation {
    fn fail(&mut self, element: &FormElement, default_message: String) {
        tracing::debug!(field = %element.name, kind = %element.kind, "Field failed validation");
        self.valid = false;
        let message = element
            .attr("message")
            .map_or(default_message, str::to_string);
        self.messages.push(message);
    }
}

impl Form {
    /// Check every indexed element in order, collecting one message per
    /// failing element.
    pub(crate) fn run_validation(&self) -> Validation {
        let mut validation = Validation {
            valid: true,
            messages: Vec::new(),
        };

        for element in &self.elements {
            if !element.has_attr("required") {
                if element.kind == ControlKind::Text {
                    self.check_optional_number(element, &mut validation);
                }
                continue;
            }
            match element.kind {
                kind if kind.is_text_input() => self.check_text(element, &mut validation),
                ControlKind::SingleSelect => self.check_single(element, &mut validation),
                ControlKind::MultiSelect => self.check_multi(element, &mut validation),
                _ => {}
            }
        }

        tracing::debug!(
            valid = validation.valid,
            failures = validation.messages.len(),
            "Validated form"
        );
        validation
    }

    /// The validator named by the element's `validator` attribute. An
    /// unregistered name is reported and treated as if no validator was set.
    fn validator_for(&self, element: &FormElement) -> Option<&dyn Validator> {
        let name = element.attr("validator")?;
        let validator = self.validators.get(name);
        if validator.is_none() {
            self.warn(
                "F-3-1",
                "Unknown Validator",
                format!(
                    "Field `{}` names validator `{}`, which is not registered",
                    element.name, name
                ),
                Some(element.span),
            );
        }
        validator
    }

    fn text_value(&self, element: &FormElement) -> Option<String> {
        self.resolve(&element.name, false)
            .and_then(|resolved| resolved.as_text().map(str::to_string))
    }

    fn check_text(&self, element: &FormElement, validation: &mut Validation) {
        let value = self.text_value(element);
        let text = value.as_deref().unwrap_or_default();

        if let Some(validator) = self.validator_for(element) {
            let input = ValidatorInput::Text {
                value: value.as_deref(),
            };
            if !validator.validate(&input) {
                validation.fail(element, not_valid(element));
            }
        } else if element.kind == ControlKind::Text && element.has_attr("number") {
            if !is_integer_literal(text) {
                validation.fail(element, not_a_number(element));
            }
        } else if let Some(minimum) = element.attr("minlength") {
            let minimum = lenient_int(minimum);
            let length = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);
            if length < minimum {
                validation.fail(
                    element,
                    format!(
                        "Field \"{}\" requires at least {} characters.",
                        element.name, minimum
                    ),
                );
            }
        } else if text.is_empty() {
            validation.fail(element, format!("Field \"{}\" may not be empty.", element.name));
        }
    }

    /// A text field that is not required but wants a number is only checked
    /// when something was entered.
    fn check_optional_number(&self, element: &FormElement, validation: &mut Validation) {
        if !element.has_attr("number") {
            return;
        }
        match self.text_value(element) {
            Some(text) if !text.is_empty() && !is_integer_literal(&text) => {
                validation.fail(element, not_a_number(element));
            }
            _ => {}
        }
    }

    fn check_single(&self, element: &FormElement, validation: &mut Validation) {
        let Some(index) = self
            .resolve(&element.name, false)
            .and_then(|resolved| resolved.index())
        else {
            validation.fail(element, not_valid(element));
            return;
        };

        if let Some(validator) = self.validator_for(element) {
            let value = self
                .bound(element.attr("bind"), element.span)
                .and_then(|binding| self.label_at(binding, index, element));
            if !validator.validate(&ValidatorInput::Single { value, index }) {
                validation.fail(element, not_valid(element));
            }
        } else if index == -1 {
            validation.fail(element, format!("Select one option from \"{}\".", element.name));
        }
    }

    fn check_multi(&self, element: &FormElement, validation: &mut Validation) {
        let indices = self
            .resolve(&element.name, false)
            .map(|resolved| resolved.indices())
            .unwrap_or_default();
        if indices.is_empty() {
            validation.fail(
                element,
                format!(
                    "For field \"{}\" at least one element must be selected.",
                    element.name
                ),
            );
            return;
        }

        if let Some(validator) = self.validator_for(element) {
            let values: Vec<&str> = match self.bound(element.attr("bind"), element.span) {
                Some(binding) => indices
                    .iter()
                    .filter_map(|&index| self.label_at(binding, index, element))
                    .collect(),
                None => Vec::new(),
            };
            let input = ValidatorInput::Multi {
                values: &values,
                indices: &indices,
            };
            if !validator.validate(&input) {
                validation.fail(element, not_valid(element));
            }
        }
    }
}

fn not_valid(element: &FormElement) -> String {
    format!("Field \"{}\" is not valid.", element.name)
}

fn not_a_number(element: &FormElement) -> String {
    format!("Field \"{}\" may only contain a number.", element.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ValidatorRegistry;
    use crate::request::RequestData;
    use pretty_assertions::assert_eq;

    fn validate(layout: &str, request: RequestData) -> (bool, Vec<String>) {
        let form = Form::load(layout)
            .unwrap()
            .with_request(request.with_param("go", "1"));
        let valid = form.is_valid();
        (valid, form.messages().to_vec())
    }

    fn layout(controls: &str) -> String {
        format!(r#"<ui:form>{}<ui:submit name="go"/></ui:form>"#, controls)
    }

    #[test]
    fn test_required_text_rules() {
        let (valid, messages) = validate(
            &layout(
                r#"<ui:text name="a" required=""/>
                   <ui:secret name="b" required="" minlength="4"/>
                   <ui:text name="c" required="" number=""/>
                   <ui:textArea name="d" required="" number=""/>"#,
            ),
            RequestData::new("/")
                .with_param("b", "äöü")
                .with_param("c", "12a")
                .with_param("d", ""),
        );
        assert!(!valid);
        assert_eq!(
            messages,
            vec![
                "Field \"a\" may not be empty.",
                "Field \"b\" requires at least 4 characters.",
                "Field \"c\" may only contain a number.",
                "Field \"d\" may not be empty.",
            ]
        );
    }

    #[test]
    fn test_minlength_counts_characters() {
        let (valid, _) = validate(
            &layout(r#"<ui:text name="a" required="" minlength="3"/>"#),
            RequestData::new("/").with_param("a", "äöü"),
        );
        assert!(valid);
    }

    #[test]
    fn test_optional_number() {
        let controls = r#"<ui:text name="n" number=""/>"#;
        assert!(validate(&layout(controls), RequestData::new("/")).0);
        assert!(validate(&layout(controls), RequestData::new("/").with_param("n", "")).0);
        assert!(validate(&layout(controls), RequestData::new("/").with_param("n", "-3")).0);

        let (valid, messages) = validate(&layout(controls), RequestData::new("/").with_param("n", "03"));
        assert!(!valid);
        assert_eq!(messages, vec!["Field \"n\" may only contain a number."]);
    }

    #[test]
    fn test_custom_message() {
        let (_, messages) = validate(
            &layout(r#"<ui:text name="a" required="" message="Please enter a name"/>"#),
            RequestData::new("/"),
        );
        assert_eq!(messages, vec!["Please enter a name"]);
    }

    #[test]
    fn test_single_select_rules() {
        let controls = r#"<ui:singleSelect name="s" required="" bind="opts"/>"#;
        let (_, messages) = validate(&layout(controls), RequestData::new("/"));
        assert_eq!(messages, vec!["Field \"s\" is not valid."]);

        let (_, messages) = validate(&layout(controls), RequestData::new("/").with_param("s", ""));
        assert_eq!(messages, vec!["Field \"s\" is not valid."]);

        let (_, messages) = validate(&layout(controls), RequestData::new("/").with_param("s", "-1"));
        assert_eq!(messages, vec!["Select one option from \"s\"."]);

        let (valid, _) = validate(&layout(controls), RequestData::new("/").with_param("s", "0"));
        assert!(valid);
    }

    #[test]
    fn test_multi_select_required() {
        let controls = r#"<ui:multiSelect name="m" required=""/>"#;
        let (_, messages) = validate(&layout(controls), RequestData::new("/"));
        assert_eq!(messages, vec!["For field \"m\" at least one element must be selected."]);

        let (valid, _) = validate(
            &layout(controls),
            RequestData::new("/").with_param("m", vec!["on"]),
        );
        assert!(valid);
    }

    #[test]
    fn test_validators_receive_bound_values() {
        let validators = ValidatorRegistry::new()
            .with("no_basic", |input: &ValidatorInput<'_>| match input {
                ValidatorInput::Single { value, .. } => *value != Some("Basic"),
                _ => false,
            })
            .with("two_max", |input: &ValidatorInput<'_>| match input {
                ValidatorInput::Multi { values, indices } => {
                    values.len() <= 2 && values.len() == indices.len()
                }
                _ => false,
            });

        let mut form = Form::load(&layout(
            r#"<ui:singleSelect name="s" required="" bind="langs" validator="no_basic"/>
               <ui:multiSelect name="m" required="" bind="langs" validator="two_max"/>"#,
        ))
        .unwrap()
        .with_validators(validators)
        .with_request(
            RequestData::new("/")
                .with_param("go", "1")
                .with_param("s", "0")
                .with_param("m", vec!["0", "1", "2"]),
        );
        form.register_binding("langs", vec!["Basic", "Pascal", "C"]);

        assert!(!form.is_valid());
        assert_eq!(
            form.messages(),
            ["Field \"s\" is not valid.", "Field \"m\" is not valid."]
        );
    }

    #[test]
    fn test_text_validator_replaces_builtin_rules() {
        let form = Form::load(&layout(
            r#"<ui:text name="a" required="" number="" validator="anything"/>"#,
        ))
        .unwrap()
        .with_validator("anything", |_: &ValidatorInput<'_>| true)
        .with_request(RequestData::new("/").with_param("go", "1"));
        assert!(form.is_valid());
    }

    #[test]
    fn test_unknown_validator_falls_back() {
        let form = Form::load(&layout(r#"<ui:text name="a" required="" validator="missing"/>"#))
            .unwrap()
            .with_request(RequestData::new("/").with_param("go", "1"));
        assert!(!form.is_valid());
        assert_eq!(form.messages(), ["Field \"a\" may not be empty."]);

        let codes: Vec<_> = form.diagnostics().into_iter().filter_map(|d| d.code).collect();
        assert_eq!(codes, vec!["F-3-1"]);
    }

    #[test]
    fn test_unsubmitted_form_is_invalid_without_messages() {
        let form = Form::load(&layout(r#"<ui:text name="a" required=""/>"#)).unwrap();
        assert!(!form.is_valid());
        assert!(form.messages().is_empty());
    }

    #[test]
    fn test_validation_is_cached() {
        let mut form = Form::load(&layout(r#"<ui:text name="a" required=""/>"#))
            .unwrap()
            .with_request(RequestData::new("/").with_param("go", "1").with_param("a", "x"));
        assert!(form.is_valid());
        form.request_mut().remove("a");
        assert!(form.is_valid());
        assert!(form.messages().is_empty());
    }
}
