//! Generic split representation shared by every table format.
//!
//! A [`FileSplit`] describes which bytes of which file a worker should scan. Formats that need
//! more than that wrap a [`FileSplit`] in their own type and implement [`Split`] for it; the
//! extra fields travel across process boundaries in [`FileSplit::custom_split_info`].
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::info::SplitInfo;
use crate::SplitResult;

/// Shared handle to any split, generic or format specific.
pub type SplitRef = Arc<dyn Split>;

/// A unit of scannable work.
///
/// Every split, whatever table format produced it, exposes the generic [`FileSplit`] it wraps.
pub trait Split: Debug + Send + Sync {
    /// The format agnostic split this split wraps.
    fn file_split(&self) -> &FileSplit;

    /// Return a reference to the concrete type, for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Split + 'a {
    /// Downcast to a concrete split type.
    pub fn downcast_ref<T: Split + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the split is of the concrete type `T`.
    pub fn is<T: Split + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Format agnostic description of a byte range within a file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSplit {
    path: String,
    start: u64,
    length: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_split_info: Option<HashMap<String, String>>,
}

impl FileSplit {
    /// Create a split covering `length` bytes of `path` starting at `start`.
    pub fn new(path: impl Into<String>, start: u64, length: u64) -> Self {
        Self {
            path: path.into(),
            start,
            length,
            hosts: Vec::new(),
            custom_split_info: None,
        }
    }

    /// Set the hosts holding the split's data locally.
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Attach flattened format specific metadata to the split.
    pub fn with_custom_split_info(mut self, info: SplitInfo) -> Self {
        self.custom_split_info = Some(info.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Locality hints, possibly empty.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// The opaque metadata slot used to carry format specific data.
    pub fn custom_split_info(&self) -> Option<&HashMap<String, String>> {
        self.custom_split_info.as_ref()
    }

    /// Empty the custom split info slot, returning its previous content.
    pub fn take_custom_split_info(&mut self) -> Option<HashMap<String, String>> {
        self.custom_split_info.take()
    }

    /// Serialize the split, including its custom split info, for transport.
    pub fn to_json(&self) -> SplitResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read a split produced by [`FileSplit::to_json`].
    pub fn from_json(payload: &str) -> SplitResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl Split for FileSplit {
    fn file_split(&self) -> &FileSplit {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_file_split_is_its_own_file_split() {
        let split = FileSplit::new("/tbl/part-0.parquet", 0, 1024).with_hosts(["host-a"]);
        let split_ref: SplitRef = Arc::new(split.clone());
        assert_eq!(split_ref.file_split(), &split);
        assert!(split_ref.is::<FileSplit>());
        assert_eq!(split_ref.downcast_ref::<FileSplit>(), Some(&split));
    }

    #[test]
    fn test_serialized_shape() {
        let split = FileSplit::new("/tbl/part-0.parquet", 4, 100).with_hosts(["h1", "h2"]);
        let value = serde_json::to_value(&split).unwrap();
        assert_eq!(
            value,
            json!({
                "path": "/tbl/part-0.parquet",
                "start": 4,
                "length": 100,
                "hosts": ["h1", "h2"],
            })
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_custom_split_info() {
        let mut info = SplitInfo::new("some.Format");
        info.insert("key", "value");
        let split = FileSplit::new("/tbl/f", 0, 10).with_custom_split_info(info);

        let restored = FileSplit::from_json(&split.to_json().unwrap()).unwrap();
        assert_eq!(restored, split);
        assert_eq!(
            restored.custom_split_info().unwrap().get("key").map(String::as_str),
            Some("value")
        );
    }

    #[test]
    fn test_take_custom_split_info() {
        let plain = FileSplit::new("/tbl/f", 0, 10);
        let mut split = plain.clone().with_custom_split_info(SplitInfo::new("some.Format"));

        let taken = split.take_custom_split_info().unwrap();
        assert_eq!(taken.len(), 1);
        assert_eq!(split, plain);
        assert!(split.take_custom_split_info().is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = FileSplit::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::SplitCodecError::InvalidJson { .. }));
    }
}
