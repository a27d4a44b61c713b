//! The flat element index built from a layout.

use crate::error::{FormError, Result};
use crate::kind::ControlKind;
use formlet_error_reporting::SourceSpan;
use formlet_xml::{Attributes, LayoutElement, LayoutNode};

/// A named control found in the layout.
///
/// Identity is the element's position in [`Form::elements`](crate::Form::elements);
/// names may repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct FormElement {
    pub kind: ControlKind,
    pub name: String,
    /// All attributes as written, `name` included.
    pub attributes: Attributes,
    pub span: SourceSpan,
}

impl FormElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }
}

/// Walk every element below `root` in document order and collect the named
/// controls of the `prefix` namespace.
///
/// The root itself is never indexed. Nameless controls are accepted only for
/// kinds that do not carry a value; any other nameless element in the
/// namespace fails the whole index.
pub(crate) fn index_elements(root: &LayoutElement, prefix: &str) -> Result<Vec<FormElement>> {
    let mut elements = Vec::new();
    for child in root.child_elements() {
        collect(child, prefix, &mut elements)?;
    }
    tracing::debug!(count = elements.len(), "Indexed form elements");
    Ok(elements)
}

fn collect(element: &LayoutElement, prefix: &str, out: &mut Vec<FormElement>) -> Result<()> {
    if element.in_namespace(prefix) {
        let kind = ControlKind::from_local_name(&element.name);
        let name = element.attr("name").filter(|name| !name.is_empty());

        match (kind, name) {
            (Some(kind), Some(name)) => out.push(FormElement {
                kind,
                name: name.to_string(),
                attributes: element.attributes.clone(),
                span: element.span,
            }),
            (Some(kind), None) if kind.name_optional() => {}
            (None, Some(name)) => {
                tracing::debug!(
                    element = %element.qualified_name(),
                    name,
                    "Skipping unknown control kind"
                );
            }
            (_, None) => {
                return Err(FormError::MissingName {
                    element: element.qualified_name(),
                    location: element.name_span,
                });
            }
        }
    }

    for child in &element.children {
        if let LayoutNode::Element(child) = child {
            collect(child, prefix, out)?;
        }
    }
    Ok(())
}
