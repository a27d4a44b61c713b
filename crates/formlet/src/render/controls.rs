//! Markup fragments for individual form controls.

use super::html::{escape_html, join_attributes};
use crate::binding::DataBinding;
use crate::form::Form;
use crate::kind::ControlKind;
use crate::value::{Resolved, lenient_int};
use formlet_xml::{Attributes, LayoutElement};

/// Attributes that only drive validation and never reach the output.
const VALIDATION_ATTRIBUTES: [&str; 5] = ["required", "validator", "message", "number", "minlength"];

/// Render one control element to a single markup fragment.
pub(super) fn render_control(form: &Form, kind: ControlKind, element: &LayoutElement) -> String {
    let mut attrs = element.attributes.clone();
    for name in VALIDATION_ATTRIBUTES {
        attrs.remove(name);
    }

    let control = Control { form, element };
    match kind {
        ControlKind::Label => control.label(attrs),
        ControlKind::Text => control.input(attrs, "text"),
        ControlKind::Secret => control.input(attrs, "password"),
        ControlKind::Hidden => control.input(attrs, "hidden"),
        ControlKind::TextArea => control.text_area(attrs),
        ControlKind::Submit => control.submit(attrs),
        ControlKind::Messages => control.messages(attrs),
        ControlKind::SingleSelect => control.single_select(attrs),
        ControlKind::MultiSelect => control.multi_select(attrs),
        // Directives are expanded by the tree walk
        ControlKind::IfError | ControlKind::Rendered => String::new(),
    }
}

/// Inline marker shown in place of a label that cannot be translated.
pub(super) fn error_marker(text: &str) -> String {
    format!("<em style=\"color: red;\">{}</em>", text)
}

struct Control<'a> {
    form: &'a Form,
    element: &'a LayoutElement,
}

impl Control<'_> {
    fn name(attrs: &Attributes) -> String {
        attrs.get("name").unwrap_or_default().to_string()
    }

    fn translate(&self, key: &str) -> Option<String> {
        let location = Some(self.element.span);
        match &self.form.translator {
            None => {
                self.form.warn(
                    "F-3-2",
                    "No Translator",
                    format!("Cannot translate `{}`: no translator is configured", key),
                    location,
                );
                None
            }
            Some(translator) => {
                let text = translator.translate(key);
                if text.is_none() {
                    self.form.warn(
                        "F-3-3",
                        "Missing Translation",
                        format!("The translator has no entry for `{}`", key),
                        location,
                    );
                }
                text
            }
        }
    }

    /// Translate text carrying the sentinel, falling back to the bare key.
    /// Other text is returned unchanged.
    fn localize(&self, text: &str) -> String {
        match self.form.options.translation_key(text) {
            Some(key) => self.translate(key).unwrap_or_else(|| key.to_string()),
            None => text.to_string(),
        }
    }

    fn options(&self, attrs: &Attributes) -> &[String] {
        self.form
            .bound(attrs.get("bind"), self.element.span)
            .map(DataBinding::labels)
            .unwrap_or_default()
    }

    /// Warn about every current index with no option behind it. Fields
    /// without a registered binding were already reported as such.
    fn check_range(&self, attrs: &Attributes, labels: &[String], indices: &[i64]) {
        let registered = attrs
            .get("bind")
            .is_some_and(|bind| self.form.bindings.contains_key(bind));
        if !registered {
            return;
        }
        let name = Self::name(attrs);
        for &index in indices {
            let in_range = usize::try_from(index).is_ok_and(|i| i < labels.len());
            if !in_range {
                self.form.warn_out_of_range(&name, index, self.element.span);
            }
        }
    }

    fn label(&self, mut attrs: Attributes) -> String {
        let Some(key) = attrs.remove("key") else {
            return error_marker("??????");
        };
        let Some(mut text) = self.translate(&key) else {
            return error_marker(&format!("???{}???", escape_html(&key)));
        };

        if let Some(suffix) = attrs.remove("append") {
            text.push_str(&suffix);
        }
        if attrs.contains("plain") {
            return text;
        }

        let mut out = String::from("<label");
        if !attrs.is_empty() {
            out.push(' ');
            out.push_str(&join_attributes(&attrs));
        }
        out.push('>');
        out.push_str(&text);
        out.push_str("</label>");
        out
    }

    fn input(&self, mut attrs: Attributes, wire_type: &str) -> String {
        if let Some(map) = attrs.remove("valuemap") {
            // The value sits in a list submission at the given position
            let name = Self::name(&attrs).replace("[]", "");
            let entry = match self.form.resolve(&name, true) {
                Some(Resolved::Raw(values)) => usize::try_from(lenient_int(&map))
                    .ok()
                    .and_then(|i| values.get(i).cloned()),
                _ => None,
            };
            if let Some(value) = entry.filter(|v| !v.is_empty()) {
                attrs.set("value", value);
            }
        } else {
            let current = self
                .form
                .resolve(&Self::name(&attrs), false)
                .and_then(|resolved| resolved.as_text().map(str::to_string))
                .filter(|v| !v.is_empty());
            if let Some(value) = current {
                attrs.set("value", value);
            }
        }

        format!("<input type=\"{}\" {} />", wire_type, join_attributes(&attrs))
    }

    fn text_area(&self, mut attrs: Attributes) -> String {
        attrs.remove("value");
        let body = self
            .form
            .resolve(&Self::name(&attrs), false)
            .and_then(|resolved| resolved.as_text().map(escape_html))
            .unwrap_or_default();
        format!("<textarea {}>{}</textarea>", join_attributes(&attrs), body)
    }

    fn submit(&self, mut attrs: Attributes) -> String {
        if let Some(value) = attrs.get("value").map(str::to_string) {
            if self.form.options.translation_key(&value).is_some() {
                attrs.set("value", self.localize(&value));
            }
        }
        format!("<input type=\"submit\" {} />", join_attributes(&attrs))
    }

    fn messages(&self, mut attrs: Attributes) -> String {
        let class = attrs.remove("errorClass");

        let mut out = String::from("<p class=\"form-messages\"><ul");
        if !attrs.is_empty() {
            out.push(' ');
            out.push_str(&join_attributes(&attrs));
        }
        out.push_str(">\n");

        for message in self.form.messages() {
            out.push_str("<li");
            if let Some(class) = &class {
                out.push_str(&format!(" class=\"{}\"", escape_html(class)));
            }
            out.push('>');
            out.push_str(&self.localize(message));
            out.push_str("</li>\n");
        }

        out.push_str("</ul></p>\n");
        out
    }

    fn single_select(&self, mut attrs: Attributes) -> String {
        let labels = self.options(&attrs);
        let name = Self::name(&attrs);
        let current = self
            .form
            .resolve(&name, false)
            .and_then(|resolved| resolved.index());
        self.check_range(&attrs, labels, current.as_slice());

        attrs.remove("bind");
        let style = attrs.remove("style");
        let empty = attrs.remove("empty");
        let is_current = |i: usize| current.and_then(|c| usize::try_from(c).ok()) == Some(i);

        if style.as_deref() == Some("radio") {
            let mut out = String::new();
            for (i, label) in labels.iter().enumerate() {
                let id = format!("{}_labelfor_{}", name, i);
                attrs.set("id", id.as_str());
                out.push_str(&format!(
                    "<input type=\"radio\" {} value=\"{}\"{}>&nbsp;<label for=\"{}\">{}</label>\n",
                    join_attributes(&attrs),
                    i,
                    if is_current(i) { " checked" } else { "" },
                    escape_html(&id),
                    label
                ));
            }
            return out;
        }

        let mut out = format!("<select {}>\n", join_attributes(&attrs));
        if let Some(empty) = &empty {
            // Nothing chosen yet selects the empty option
            let selected = matches!(current, None | Some(-1));
            out.push_str(&format!(
                "<option value=\"-1\"{}>{}</option>\n",
                if selected { " selected" } else { "" },
                self.localize(empty.trim())
            ));
        }
        for (i, label) in labels.iter().enumerate() {
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>\n",
                i,
                if is_current(i) { " selected" } else { "" },
                label
            ));
        }
        out.push_str("</select>");
        out
    }

    fn multi_select(&self, mut attrs: Attributes) -> String {
        let labels = self.options(&attrs);
        let name = Self::name(&attrs);
        let resolved = self.form.resolve(&name, false);
        let sent = resolved.as_ref().map(Resolved::indices).unwrap_or_default();
        self.check_range(&attrs, labels, &sent);

        attrs.remove("bind");
        let style = attrs.remove("style");
        let is_sent = |i: usize| sent.iter().any(|&s| usize::try_from(s).ok() == Some(i));
        attrs.set("name", format!("{}[]", name));

        if style.as_deref() == Some("check") {
            if labels.is_empty() {
                return format!(
                    "<input type=\"checkbox\" {} value=\"on\"{}>&nbsp;\n",
                    join_attributes(&attrs),
                    if resolved.is_some() { " checked" } else { "" }
                );
            }

            let mut out = String::new();
            for (i, label) in labels.iter().enumerate() {
                let id = format!("{}_labelfor_{}", name, i);
                attrs.set("id", id.as_str());
                out.push_str(&format!(
                    "<input type=\"checkbox\" {} value=\"{}\"{}>&nbsp;<label for=\"{}\">{}</label>\n",
                    join_attributes(&attrs),
                    i,
                    if is_sent(i) { " checked" } else { "" },
                    escape_html(&id),
                    label
                ));
            }
            return out;
        }

        let mut out = format!("<select {} multiple>\n", join_attributes(&attrs));
        for (i, label) in labels.iter().enumerate() {
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>\n",
                i,
                if is_sent(i) { " selected" } else { "" },
                label
            ));
        }
        out.push_str("</select>");
        out
    }
}
