//! Submitted request data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single request parameter: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::List(values)
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Value::List(values.into_iter().map(String::from).collect())
    }
}

/// The request a form is evaluated against: the request path (used as the
/// default form action) and the submitted parameters.
///
/// ```
/// use formlet::{RequestData, Value};
///
/// let request = RequestData::from_pairs(
///     "/signup",
///     [("usn", "ada"), ("langs[]", "0"), ("langs[]", "2")],
/// );
/// assert_eq!(request.get("usn"), Some(&Value::from("ada")));
/// assert_eq!(request.get("langs"), Some(&Value::from(vec!["0", "2"])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestData {
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    params: IndexMap<String, Value>,
}

impl RequestData {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: IndexMap::new(),
        }
    }

    /// Build request data from decoded `key=value` pairs.
    ///
    /// Keys ending in `[]` collect into a list under the bare key; any other
    /// repeated key keeps its last value.
    pub fn from_pairs<K, V>(path: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::new(path);
        for (key, value) in pairs {
            let key = key.as_ref();
            match key.strip_suffix("[]") {
                Some(base) => request.push(base, value),
                None => request.insert(key, Value::Text(value.into())),
            }
        }
        request
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(name.into(), value.into());
    }

    /// Append to the list stored under `name`, turning a scalar into a list.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let entry = self
            .params
            .entry(name.into())
            .or_insert_with(|| Value::List(Vec::new()));
        match entry {
            Value::List(values) => values.push(value),
            Value::Text(existing) => {
                let first = std::mem::take(existing);
                *entry = Value::List(vec![first, value]);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.params.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}
