//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Options that shape how a layout is read and rendered.
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes:
///
/// ```
/// use formlet::FormOptions;
///
/// let options = FormOptions::from_json(r#"{ "prefix": "f", "default-method": "get" }"#).unwrap();
/// assert_eq!(options.prefix, "f");
/// assert_eq!(options.root, "form");
/// assert_eq!(options.default_method, "get");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FormOptions {
    /// Namespace prefix of form-control elements.
    pub prefix: String,

    /// Local name of the required root element (`<prefix:root>`).
    pub root: String,

    /// Leading character that marks a string as a translation key.
    pub translation_sentinel: char,

    /// Pass-through tags written as `<tag />` when they have no children.
    pub self_closing_tags: Vec<String>,

    /// `method` given to the outermost `form` tag when it has none.
    pub default_method: String,

    /// Indentation added per nesting level of the rendered markup.
    pub indent: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            prefix: "ui".to_string(),
            root: "form".to_string(),
            translation_sentinel: ':',
            self_closing_tags: ["hr", "br", "link", "meta"]
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            default_method: "post".to_string(),
            indent: "  ".to_string(),
        }
    }
}

impl FormOptions {
    /// Load options from a JSON document. Unknown keys are rejected.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn is_self_closing(&self, tag: &str) -> bool {
        self.self_closing_tags.iter().any(|t| t == tag)
    }

    /// The reserved root element, e.g. `ui:form`.
    pub fn root_name(&self) -> String {
        format!("{}:{}", self.prefix, self.root)
    }

    /// Strip the translation sentinel, returning the key if it was present.
    pub fn translation_key<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.strip_prefix(self.translation_sentinel)
    }
}
