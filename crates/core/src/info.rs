//! Flattened, format specific split metadata.
//!
//! [`SplitInfo`] is the wire visible artifact of the codec: a string to string mapping that rides
//! in the generic split's opaque metadata slot. Key names are part of the compatibility surface
//! and must stay stable across releases that may decode them.
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{SplitCodecError, SplitResult};

/// Reserved key identifying the format that produced a [`SplitInfo`].
pub const CUSTOM_SPLIT_CLASS_KEY: &str = "custom_split_class";

/// Delimiter used to flatten list valued fields into a single value.
///
/// Elements must not contain the delimiter themselves; this is not validated and an element
/// containing it changes the element count after decoding.
pub const LIST_DELIMITER: char = ',';

/// Flat string-keyed metadata tagged with the format that produced it.
///
/// The format tag under [`CUSTOM_SPLIT_CLASS_KEY`] is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, String>",
    into = "HashMap<String, String>"
)]
pub struct SplitInfo {
    entries: HashMap<String, String>,
}

impl SplitInfo {
    /// Create split info for the given format tag.
    pub fn new(format: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(CUSTOM_SPLIT_CLASS_KEY.to_string(), format.into());
        Self { entries }
    }

    /// The format tag.
    pub fn format(&self) -> &str {
        self.entries
            .get(CUSTOM_SPLIT_CLASS_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether this info was produced by the format identified by `format`.
    pub fn is_format(&self, format: &str) -> bool {
        self.format() == format
    }

    /// Insert a value, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Insert a list valued field, joined with [`LIST_DELIMITER`].
    ///
    /// An empty list is stored as the empty string, never as an absent key.
    pub fn insert_list<I, S>(&mut self, key: impl Into<String>, items: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = key.into();
        let mut joined = String::new();
        for (idx, item) in items.into_iter().enumerate() {
            let item = item.as_ref();
            if item.contains(LIST_DELIMITER) {
                warn!(
                    key = %key,
                    element = %item,
                    "list element contains the delimiter and will not round trip"
                );
            }
            if idx > 0 {
                joined.push(LIST_DELIMITER);
            }
            joined.push_str(item);
        }
        self.entries.insert(key, joined)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get a value the claiming converter cannot do without.
    pub fn require(&self, key: &str) -> SplitResult<&str> {
        self.get(key)
            .ok_or_else(|| SplitCodecError::missing_field(self.format(), key))
    }

    /// Get a list valued field.
    ///
    /// Absent keys and empty strings both yield an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            None | Some("") => Vec::new(),
            Some(value) => value.split(LIST_DELIMITER).map(String::from).collect(),
        }
    }

    /// Get a required value and parse it into `T`.
    pub fn parse<T>(&self, key: &str) -> SplitResult<T>
    where
        T: FromStr,
        T::Err: Error + Send + Sync + 'static,
    {
        let value = self.require(key)?;
        value.parse::<T>().map_err(|err| SplitCodecError::InvalidField {
            format: self.format().to_string(),
            key: key.to_string(),
            value: value.to_string(),
            source: Box::new(err),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }
}

impl TryFrom<HashMap<String, String>> for SplitInfo {
    type Error = SplitCodecError;

    fn try_from(entries: HashMap<String, String>) -> SplitResult<Self> {
        if !entries.contains_key(CUSTOM_SPLIT_CLASS_KEY) {
            return Err(SplitCodecError::InvalidArgument(format!(
                "custom split info without '{CUSTOM_SPLIT_CLASS_KEY}' key: {:?}",
                entries.keys().collect::<Vec<_>>()
            )));
        }
        Ok(Self { entries })
    }
}

impl From<SplitInfo> for HashMap<String, String> {
    fn from(info: SplitInfo) -> Self {
        info.entries
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_sets_format_tag() {
        let info = SplitInfo::new("my.Format");
        assert_eq!(info.format(), "my.Format");
        assert!(info.is_format("my.Format"));
        assert!(!info.is_format("other.Format"));
        assert_eq!(info.len(), 1);
        assert_eq!(info.get(CUSTOM_SPLIT_CLASS_KEY), Some("my.Format"));
    }

    #[test]
    fn test_list_fields() {
        let mut info = SplitInfo::new("f");
        info.insert_list("paths", ["/a", "/b", "/c"]);
        assert_eq!(info.get("paths"), Some("/a,/b,/c"));
        assert_eq!(info.get_list("paths"), vec!["/a", "/b", "/c"]);

        info.insert_list("single", ["/only"]);
        assert_eq!(info.get_list("single"), vec!["/only"]);
    }

    #[test]
    fn test_empty_list_is_empty_string() {
        let mut info = SplitInfo::new("f");
        info.insert_list("paths", Vec::<String>::new());
        assert_eq!(info.get("paths"), Some(""));
        assert!(info.get_list("paths").is_empty());
        assert!(info.get_list("absent").is_empty());
    }

    #[test]
    fn test_delimiter_inside_element_changes_count() {
        let mut info = SplitInfo::new("f");
        info.insert_list("paths", ["/a,b", "/c"]);
        assert_eq!(info.get_list("paths"), vec!["/a", "b", "/c"]);
    }

    #[test]
    fn test_require_reports_format_and_key() {
        let info = SplitInfo::new("my.Format");
        match info.require("base") {
            Err(SplitCodecError::MissingField { format, key }) => {
                assert_eq!(format, "my.Format");
                assert_eq!(key, "base");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_parse() {
        let mut info = SplitInfo::new("f");
        info.insert("len", "42");
        info.insert("bad", "forty-two");
        assert_eq!(info.parse::<u64>("len").unwrap(), 42);

        let err = info.parse::<u64>("bad").unwrap_err();
        assert!(err.is_malformed());
        assert!(matches!(err, SplitCodecError::InvalidField { ref value, .. } if value == "forty-two"));
        assert!(info.parse::<u64>("absent").unwrap_err().is_malformed());
    }

    #[test]
    fn test_try_from_map_requires_format_tag() {
        let map = HashMap::from([("hudi_basepath".to_string(), "/tbl".to_string())]);
        let err = SplitInfo::try_from(map).unwrap_err();
        assert!(matches!(err, SplitCodecError::InvalidArgument(_)));

        let map = HashMap::from([
            (CUSTOM_SPLIT_CLASS_KEY.to_string(), "f".to_string()),
            ("k".to_string(), "v".to_string()),
        ]);
        let info = SplitInfo::try_from(map.clone()).unwrap();
        assert_eq!(info.format(), "f");
        assert_eq!(HashMap::from(info), map);
    }

    #[test]
    fn test_deserialize_validates_format_tag() {
        let info: SplitInfo =
            serde_json::from_str(r#"{"custom_split_class":"f","k":"v"}"#).unwrap();
        assert_eq!(info.get("k"), Some("v"));
        assert!(serde_json::from_str::<SplitInfo>(r#"{"k":"v"}"#).is_err());
    }
}
