//! Builder API for diagnostic messages.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
use crate::span::SourceSpan;

/// Builder for [`DiagnosticMessage`].
///
/// ```
/// use formlet_error_reporting::DiagnosticMessageBuilder;
///
/// let msg = DiagnosticMessageBuilder::warning("Unknown Validator")
///     .with_code("F-3-1")
///     .problem("No validator named `email` is registered")
///     .add_info("The rule was skipped")
///     .build();
/// assert_eq!(msg.details.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    pub fn with_location(mut self, location: SourceSpan) -> Self {
        self.message.location = Some(location);
        self
    }

    /// Add an error detail (✖ bullet).
    pub fn add_detail(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Error, content.into(), None)
    }

    /// Add an error detail pointing at its own location.
    pub fn add_detail_at(self, content: impl Into<String>, location: SourceSpan) -> Self {
        self.push_detail(DetailKind::Error, content.into(), Some(location))
    }

    pub fn add_info(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Info, content.into(), None)
    }

    pub fn add_note(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Note, content.into(), None)
    }

    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    fn push_detail(mut self, kind: DetailKind, content: String, location: Option<SourceSpan>) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content,
            location,
        });
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_everything() {
        let msg = DiagnosticMessageBuilder::error("Title")
            .with_code("F-2-2")
            .problem("problem")
            .add_detail("detail")
            .add_detail_at("located", SourceSpan::new(1, 2))
            .add_note("note")
            .add_hint("hint?")
            .with_location(SourceSpan::new(0, 4))
            .build();

        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert_eq!(msg.code.as_deref(), Some("F-2-2"));
        assert_eq!(msg.details.len(), 3);
        assert_eq!(msg.details[1].location, Some(SourceSpan::new(1, 2)));
        assert_eq!(msg.details[2].kind, DetailKind::Note);
        assert_eq!(msg.hints, vec!["hint?".to_string()]);
        assert_eq!(msg.location, Some(SourceSpan::new(0, 4)));
    }
}
