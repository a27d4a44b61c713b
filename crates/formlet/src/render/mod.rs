//! Rendering a form to HTML markup.
//!
//! The layout tree is walked depth-first. Text and ordinary elements pass
//! through with their attributes; elements of the form namespace become
//! control fragments or, for directives, decide whether their children
//! are written at all.

mod controls;
mod html;

use crate::binding::DataBinding;
use crate::form::Form;
use crate::kind::ControlKind;
use formlet_xml::{Attributes, LayoutElement, LayoutNode, TextNode};
use html::{escape_html, join_attributes};
use std::fmt::{self, Write};

impl Form {
    /// Render the form to markup.
    ///
    /// A submitted form is validated first, so `messages` controls and
    /// `iferror` blocks reflect the current submission.
    ///
    /// ```
    /// use formlet::Form;
    ///
    /// let form = Form::load(r#"<ui:form><p>Hi <br/></p></ui:form>"#)?;
    /// assert_eq!(form.to_markup(), "<p>\n  Hi\n  <br />\n</p>\n");
    /// # Ok::<(), formlet::FormError>(())
    /// ```
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_markup(&mut out);
        out
    }

    /// Render the form into any [`fmt::Write`] sink.
    pub fn write_markup<W: Write>(&self, buf: &mut W) -> fmt::Result {
        if self.is_submitted() {
            self.is_valid();
        }
        tracing::trace!(elements = self.elements.len(), "Rendering form");

        let renderer = Renderer { form: self };
        for child in &self.document.root.children {
            renderer.write_node(child, 0, false, buf)?;
        }
        Ok(())
    }
}

struct Renderer<'f> {
    form: &'f Form,
}

impl Renderer<'_> {
    fn indent(&self, level: usize) -> String {
        self.form.options.indent.repeat(level)
    }

    fn write_node<W: Write>(&self, node: &LayoutNode, level: usize, in_form: bool, buf: &mut W) -> fmt::Result {
        match node {
            LayoutNode::Text(text) => self.write_text(text, level, buf),
            LayoutNode::Element(element) if element.in_namespace(&self.form.options.prefix) => {
                self.write_control(element, level, in_form, buf)
            }
            LayoutNode::Element(element) => self.write_element(element, level, in_form, buf),
        }
    }

    fn write_children<W: Write>(
        &self,
        element: &LayoutElement,
        level: usize,
        in_form: bool,
        buf: &mut W,
    ) -> fmt::Result {
        for child in &element.children {
            self.write_node(child, level, in_form, buf)?;
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, text: &TextNode, level: usize, buf: &mut W) -> fmt::Result {
        let content = text.content.trim();
        if content.is_empty() {
            return Ok(());
        }
        if text.cdata {
            writeln!(buf, "{}{}", self.indent(level), content)
        } else {
            writeln!(buf, "{}{}", self.indent(level), escape_html(content))
        }
    }

    fn write_control<W: Write>(
        &self,
        element: &LayoutElement,
        level: usize,
        in_form: bool,
        buf: &mut W,
    ) -> fmt::Result {
        let form = self.form;
        match ControlKind::from_local_name(&element.name) {
            Some(ControlKind::IfError) => {
                if form.is_submitted() && !form.is_valid() {
                    self.write_children(element, level + 1, in_form, buf)?;
                }
                Ok(())
            }
            Some(ControlKind::Rendered) => {
                // An unregistered binding is the ordinary hidden state
                let visible = element
                    .attr("var")
                    .and_then(|var| form.bindings.get(var))
                    .is_some_and(DataBinding::is_truthy);
                if visible {
                    self.write_children(element, level + 1, in_form, buf)?;
                }
                Ok(())
            }
            Some(kind) => {
                let fragment = controls::render_control(form, kind, element);
                writeln!(buf, "{}{}", self.indent(level), fragment)
            }
            None => {
                let tag = element.qualified_name();
                form.warn(
                    "F-3-4",
                    "Unknown Control Kind",
                    format!("Cannot render unknown control `{}`", tag),
                    Some(element.name_span),
                );
                let marker = controls::error_marker(&format!(
                    "Can't render \"{}\".",
                    escape_html(&tag)
                ));
                writeln!(buf, "{}{}", self.indent(level), marker)
            }
        }
    }

    fn write_element<W: Write>(
        &self,
        element: &LayoutElement,
        level: usize,
        in_form: bool,
        buf: &mut W,
    ) -> fmt::Result {
        let is_form = !in_form && element.prefix.is_none() && element.name == "form";
        let mut attributes = element.attributes.clone();
        if is_form {
            self.rewrite_form_tag(&mut attributes);
        }

        let tag = element.qualified_name();
        let indent = self.indent(level);
        write!(buf, "{}<{}", indent, tag)?;
        if !attributes.is_empty() {
            write!(buf, " {}", join_attributes(&attributes))?;
        }

        if element.children.is_empty() && self.form.options.is_self_closing(&tag) {
            return writeln!(buf, " />");
        }

        writeln!(buf, ">")?;
        self.write_children(element, level + 1, in_form || is_form, buf)?;
        writeln!(buf, "{}</{}>", indent, tag)
    }

    /// Point the outermost `form` tag at the right target.
    fn rewrite_form_tag(&self, attributes: &mut Attributes) {
        let form = self.form;
        if let Some(action) = &form.action {
            attributes.set("action", action.as_str());
        } else if !attributes.contains("action") {
            attributes.set("action", form.request.path.as_str());
        }
        if !attributes.contains("method") {
            attributes.set("method", form.options.default_method.as_str());
        }
    }
}
