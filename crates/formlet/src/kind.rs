//! Form control kinds.

use std::fmt;

/// The kind of a control element, taken from its local name in the form
/// namespace (`<ui:singleSelect>` is [`ControlKind::SingleSelect`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    Hidden,
    TextArea,
    Secret,
    SingleSelect,
    MultiSelect,
    Submit,
    Label,
    Messages,
    /// Renders its children only after a failed submission.
    IfError,
    /// Renders its children only when a data binding is truthy.
    Rendered,
}

impl ControlKind {
    pub const ALL: [ControlKind; 11] = [
        ControlKind::Text,
        ControlKind::Hidden,
        ControlKind::TextArea,
        ControlKind::Secret,
        ControlKind::SingleSelect,
        ControlKind::MultiSelect,
        ControlKind::Submit,
        ControlKind::Label,
        ControlKind::Messages,
        ControlKind::IfError,
        ControlKind::Rendered,
    ];

    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.local_name() == name)
    }

    /// The element name used in layouts, without prefix.
    pub fn local_name(self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Hidden => "hidden",
            ControlKind::TextArea => "textArea",
            ControlKind::Secret => "secret",
            ControlKind::SingleSelect => "singleSelect",
            ControlKind::MultiSelect => "multiSelect",
            ControlKind::Submit => "submit",
            ControlKind::Label => "label",
            ControlKind::Messages => "messages",
            ControlKind::IfError => "iferror",
            ControlKind::Rendered => "rendered",
        }
    }

    /// Kinds that may appear without a `name` attribute.
    pub fn name_optional(self) -> bool {
        matches!(
            self,
            ControlKind::Label | ControlKind::Messages | ControlKind::IfError | ControlKind::Rendered
        )
    }

    /// Free-text inputs that share the required/number/minlength rules.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            ControlKind::Text | ControlKind::Secret | ControlKind::TextArea
        )
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}
