//! Resolution of submitted and predefined values.

use crate::binding::DataBinding;
use crate::element::FormElement;
use crate::form::Form;
use crate::kind::ControlKind;
use crate::request::Value;
use formlet_error_reporting::SourceSpan;

/// A raw value as the engine sees it, before any binding lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A scalar, untouched.
    Text(String),
    /// A submitted list, converted to selection indices.
    Indices(Vec<i64>),
    /// A list left as given: predefined lists, or submitted lists when raw
    /// access was requested.
    Raw(Vec<String>),
}

impl Resolved {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Resolved::Text(text) => Some(text.as_str()),
            Resolved::Indices(_) | Resolved::Raw(_) => None,
        }
    }

    /// The selected index of a single selection. An empty scalar selects
    /// nothing.
    pub fn index(&self) -> Option<i64> {
        match self {
            Resolved::Text(text) if text.is_empty() => None,
            Resolved::Text(text) => Some(lenient_int(text)),
            Resolved::Indices(indices) => indices.first().copied(),
            Resolved::Raw(values) => values.first().map(|v| lenient_int(v)),
        }
    }

    /// The selected indices of a multiple selection.
    pub fn indices(&self) -> Vec<i64> {
        match self {
            Resolved::Text(text) if text.is_empty() => Vec::new(),
            Resolved::Text(text) => vec![lenient_int(text)],
            Resolved::Indices(indices) => indices.clone(),
            Resolved::Raw(values) => values.iter().map(|v| lenient_int(v)).collect(),
        }
    }
}

/// The public reading of a control's submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Non-empty free text (text, hidden, secret, textArea).
    Text(String),
    /// Index of a single selection.
    Index(i64),
    /// Indices of a multiple selection.
    Indices(Vec<i64>),
    /// Bound label of a single selection.
    Selected(String),
    /// Bound labels of a multiple selection; out-of-range indices are dropped.
    SelectedMany(Vec<String>),
    /// An unbound multiple selection (a lone checkbox) was submitted.
    Checked(bool),
}

impl Form {
    /// Resolve the value of `name` for rendering.
    ///
    /// Before submission a predefined value is returned verbatim. Otherwise
    /// the request value is used: a scalar as is, a list as selection
    /// indices, or as the raw list when `raw` is set.
    pub fn resolve(&self, name: &str, raw: bool) -> Option<Resolved> {
        if !self.is_submitted() {
            if let Some(predefined) = self.predefined.get(name) {
                return Some(match predefined {
                    Value::Text(text) => Resolved::Text(text.clone()),
                    Value::List(values) => Resolved::Raw(values.clone()),
                });
            }
        }
        self.submitted_value(name, raw)
    }

    /// The submitted value of the control `name`.
    ///
    /// Unlike [`resolve`](Self::resolve) this never falls back to predefined
    /// values. Selections are mapped through their data binding unless
    /// `index_only` is set.
    ///
    /// ```
    /// use formlet::{FieldValue, Form, RequestData};
    ///
    /// let mut form = Form::load(
    ///     r#"<ui:form><ui:singleSelect name="lang" bind="langs"/><ui:submit name="go"/></ui:form>"#,
    /// )?
    /// .with_request(RequestData::new("/").with_param("go", "1").with_param("lang", "1"));
    /// form.register_binding("langs", vec!["Basic", "Pascal"]);
    ///
    /// assert_eq!(form.value("lang", true), Some(FieldValue::Index(1)));
    /// assert_eq!(form.value("lang", false), Some(FieldValue::Selected("Pascal".to_string())));
    /// # Ok::<(), formlet::FormError>(())
    /// ```
    pub fn value(&self, name: &str, index_only: bool) -> Option<FieldValue> {
        let element = self.element(name)?;
        let resolved = self.submitted_value(name, false)?;

        match element.kind {
            ControlKind::Text | ControlKind::Hidden | ControlKind::TextArea | ControlKind::Secret => {
                resolved
                    .as_text()
                    .filter(|text| !text.is_empty())
                    .map(|text| FieldValue::Text(text.to_string()))
            }
            ControlKind::SingleSelect => {
                let index = resolved.index()?;
                if index_only {
                    return Some(FieldValue::Index(index));
                }
                let binding = self.bound(element.attr("bind"), element.span)?;
                self.label_at(binding, index, element)
                    .map(|label| FieldValue::Selected(label.to_string()))
            }
            ControlKind::MultiSelect => {
                let indices = resolved.indices();
                if index_only {
                    return Some(FieldValue::Indices(indices));
                }
                if !element.has_attr("bind") {
                    return Some(FieldValue::Checked(true));
                }
                let binding = self.bound(element.attr("bind"), element.span)?;
                let labels = indices
                    .iter()
                    .filter_map(|&index| self.label_at(binding, index, element))
                    .map(String::from)
                    .collect();
                Some(FieldValue::SelectedMany(labels))
            }
            ControlKind::Submit
            | ControlKind::Label
            | ControlKind::Messages
            | ControlKind::IfError
            | ControlKind::Rendered => None,
        }
    }

    fn submitted_value(&self, name: &str, raw: bool) -> Option<Resolved> {
        Some(match self.request.get(name)? {
            Value::List(values) if raw => Resolved::Raw(values.clone()),
            Value::List(values) => Resolved::Indices(values.iter().map(|v| lenient_int(v)).collect()),
            Value::Text(text) => Resolved::Text(text.clone()),
        })
    }

    /// The bound label at `index`. Indices other than the empty-option
    /// marker `-1` that miss the binding are reported.
    pub(crate) fn label_at<'b>(
        &self,
        binding: &'b DataBinding,
        index: i64,
        element: &FormElement,
    ) -> Option<&'b str> {
        let label = binding.label(index);
        if label.is_none() {
            self.warn_out_of_range(&element.name, index, element.span);
        }
        label
    }

    /// Record that `index` has no entry in the field's binding. The empty
    /// option `-1` is never out of range.
    pub(crate) fn warn_out_of_range(&self, field: &str, index: i64, location: SourceSpan) {
        if index == -1 {
            return;
        }
        self.warn(
            "F-3-5",
            "Selection Index Out of Range",
            format!(
                "Index {} of field `{}` has no entry in its data binding",
                index, field
            ),
            Some(location),
        );
    }
}

/// Convert text to an integer the lenient way: skip leading whitespace,
/// accept an optional sign, read digits up to the first non-digit.
/// Text without leading digits is 0; overflow saturates.
///
/// ```
/// use formlet::lenient_int;
///
/// assert_eq!(lenient_int(" 42abc"), 42);
/// assert_eq!(lenient_int("-7"), -7);
/// assert_eq!(lenient_int("abc"), 0);
/// ```
pub fn lenient_int(text: &str) -> i64 {
    let trimmed = text.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Whether `text` is exactly the canonical spelling of an integer.
pub(crate) fn is_integer_literal(text: &str) -> bool {
    lenient_int(text).to_string() == text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestData;
    use pretty_assertions::assert_eq;

    const LAYOUT: &str = r#"<ui:form>
        <ui:text name="usn"/>
        <ui:singleSelect name="lang" bind="langs"/>
        <ui:multiSelect name="tags" bind="all_tags"/>
        <ui:multiSelect name="agree"/>
        <ui:label key="x"/>
        <ui:submit name="go"/>
    </ui:form>"#;

    fn submitted(params: &[(&str, Value)]) -> Form {
        let mut request = RequestData::new("/").with_param("go", "1");
        for (name, value) in params {
            request.insert(*name, value.clone());
        }
        let mut form = Form::load(LAYOUT).unwrap().with_request(request);
        form.register_binding("langs", vec!["Basic", "Pascal", "C"]);
        form.register_binding("all_tags", vec!["red", "green"]);
        form
    }

    #[test]
    fn test_lenient_int() {
        assert_eq!(lenient_int("12"), 12);
        assert_eq!(lenient_int("\t+3x"), 3);
        assert_eq!(lenient_int("- 3"), 0);
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("1.9"), 1);
        assert_eq!(lenient_int("99999999999999999999"), i64::MAX);
        assert_eq!(lenient_int("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_integer_literal() {
        assert!(is_integer_literal("0"));
        assert!(is_integer_literal("-15"));
        assert!(!is_integer_literal("007"));
        assert!(!is_integer_literal("1.5"));
        assert!(!is_integer_literal(" 1"));
        assert!(!is_integer_literal(""));
        assert!(!is_integer_literal("-0"));
    }

    #[test]
    fn test_predefined_only_before_submission() {
        let mut form = Form::load(LAYOUT).unwrap();
        form.set_predefined("usn", "guest");
        form.set_predefined("tags", vec!["1"]);
        assert_eq!(form.resolve("usn", false), Some(Resolved::Text("guest".to_string())));
        assert_eq!(form.resolve("tags", false), Some(Resolved::Raw(vec!["1".to_string()])));
        assert_eq!(form.value("usn", false), None);

        let mut form = submitted(&[]);
        form.set_predefined("usn", "guest");
        assert_eq!(form.resolve("usn", false), None);
    }

    #[test]
    fn test_resolve_lists() {
        let form = submitted(&[("tags", Value::from(vec!["1", "x", " 2"]))]);
        assert_eq!(form.resolve("tags", false), Some(Resolved::Indices(vec![1, 0, 2])));
        assert_eq!(
            form.resolve("tags", true),
            Some(Resolved::Raw(vec!["1".to_string(), "x".to_string(), " 2".to_string()]))
        );
    }

    #[test]
    fn test_value_text_and_single() {
        let form = submitted(&[("usn", Value::from("ada")), ("lang", Value::from("2"))]);
        assert_eq!(form.value("usn", false), Some(FieldValue::Text("ada".to_string())));
        assert_eq!(form.value("lang", true), Some(FieldValue::Index(2)));
        assert_eq!(form.value("lang", false), Some(FieldValue::Selected("C".to_string())));
        assert_eq!(form.value("go", false), None);
        assert_eq!(form.value("missing", false), None);
    }

    #[test]
    fn test_value_single_out_of_range() {
        let form = submitted(&[("lang", Value::from("7"))]);
        assert_eq!(form.value("lang", false), None);
        assert_eq!(form.value("lang", true), Some(FieldValue::Index(7)));

        let codes: Vec<_> = form.diagnostics().into_iter().filter_map(|d| d.code).collect();
        assert_eq!(codes, vec!["F-3-5"]);
    }

    #[test]
    fn test_empty_values_are_none() {
        let form = submitted(&[("lang", Value::from("")), ("usn", Value::from(""))]);
        assert_eq!(form.value("lang", true), None);
        assert_eq!(form.value("usn", false), None);
    }

    #[test]
    fn test_value_multi() {
        let form = submitted(&[
            ("tags", Value::from(vec!["1", "5", "0"])),
            ("agree", Value::from(vec!["on"])),
        ]);
        assert_eq!(form.value("tags", true), Some(FieldValue::Indices(vec![1, 5, 0])));
        assert_eq!(
            form.value("tags", false),
            Some(FieldValue::SelectedMany(vec!["green".to_string(), "red".to_string()]))
        );
        assert_eq!(form.value("agree", false), Some(FieldValue::Checked(true)));
    }
}
