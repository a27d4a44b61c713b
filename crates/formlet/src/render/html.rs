//! HTML text helpers.

use formlet_xml::Attributes;

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// `key="value"` pairs separated by single spaces, values escaped.
pub(crate) fn join_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, escape_html(value)))
        .collect::<Vec<_>>()
        .join(" ")
}
