//! Host-supplied collaborators: translation and named validators.

use std::collections::HashMap;
use std::fmt;

/// Looks up localized text for a translation key.
///
/// Closures taking `&str` implement this directly:
///
/// ```
/// use formlet::Translator;
///
/// let t = |key: &str| (key == "hi").then(|| "Hallo".to_string());
/// assert_eq!(t.translate("hi").as_deref(), Some("Hallo"));
/// assert_eq!(t.translate("bye"), None);
/// ```
pub trait Translator {
    /// Localized text for `key`, or `None` if the key is unknown.
    fn translate(&self, key: &str) -> Option<String>;
}

impl<F> Translator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// A translator backed by an in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapTranslator {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// What a validator is asked to judge, depending on the control kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorInput<'a> {
    /// Free text; `None` when the field was not submitted.
    Text { value: Option<&'a str> },
    /// Single selection: the bound label (if the index hits one) and the
    /// submitted index.
    Single { value: Option<&'a str>, index: i64 },
    /// Multiple selection: the bound labels at the submitted indices and the
    /// indices themselves.
    Multi {
        values: &'a [&'a str],
        indices: &'a [i64],
    },
}

/// A named predicate referenced from the layout by `validator="name"`.
pub trait Validator {
    fn validate(&self, input: &ValidatorInput<'_>) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&ValidatorInput<'_>) -> bool,
{
    fn validate(&self, input: &ValidatorInput<'_>) -> bool {
        self(input)
    }
}

/// Validators by name.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&ValidatorInput<'_>) -> bool + 'static,
    {
        self.validators.insert(name.into(), Box::new(validator));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&ValidatorInput<'_>) -> bool + 'static,
    {
        self.register(name, validator);
        self
    }

    /// Register any [`Validator`] implementation.
    pub fn register_validator(&mut self, name: impl Into<String>, validator: impl Validator + 'static) {
        self.validators.insert(name.into(), Box::new(validator));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Validator> {
        self.validators.get(name).map(|v| v.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}
