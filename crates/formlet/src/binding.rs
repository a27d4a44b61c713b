//! Data bindings supplied by the host.

use serde::{Deserialize, Serialize};

/// Data registered under a name and referenced from the layout by `bind`
/// (select options) or `var` (`<ui:rendered>` conditions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataBinding {
    Flag(bool),
    /// Option labels; a submitted index selects the label at that position.
    Options(Vec<String>),
}

impl DataBinding {
    pub fn options<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataBinding::Options(labels.into_iter().map(Into::into).collect())
    }

    /// A flag is truthy when set; an option list when it has entries.
    pub fn is_truthy(&self) -> bool {
        match self {
            DataBinding::Flag(flag) => *flag,
            DataBinding::Options(labels) => !labels.is_empty(),
        }
    }

    /// Option labels, empty for a flag.
    pub fn labels(&self) -> &[String] {
        match self {
            DataBinding::Flag(_) => &[],
            DataBinding::Options(labels) => labels,
        }
    }

    /// The label at a submitted index; negative or out-of-range is `None`.
    pub fn label(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.labels().get(i))
            .map(String::as_str)
    }
}

impl From<bool> for DataBinding {
    fn from(flag: bool) -> Self {
        DataBinding::Flag(flag)
    }
}

impl From<Vec<String>> for DataBinding {
    fn from(labels: Vec<String>) -> Self {
        DataBinding::Options(labels)
    }
}

impl From<Vec<&str>> for DataBinding {
    fn from(labels: Vec<&str>) -> Self {
        DataBinding::options(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(DataBinding::Flag(true).is_truthy());
        assert!(!DataBinding::Flag(false).is_truthy());
        assert!(DataBinding::options(["a"]).is_truthy());
        assert!(!DataBinding::Options(Vec::new()).is_truthy());
    }

    #[test]
    fn test_label_lookup() {
        let binding = DataBinding::from(vec!["Basic", "Pascal"]);
        assert_eq!(binding.label(1), Some("Pascal"));
        assert_eq!(binding.label(2), None);
        assert_eq!(binding.label(-1), None);
        assert_eq!(DataBinding::Flag(true).label(0), None);
    }

    #[test]
    fn test_from_json() {
        let flag: DataBinding = serde_json::from_str("true").unwrap();
        assert_eq!(flag, DataBinding::Flag(true));
        let options: DataBinding = serde_json::from_str(r#"["x", "y"]"#).unwrap();
        assert_eq!(options, DataBinding::options(["x", "y"]));
    }
}
