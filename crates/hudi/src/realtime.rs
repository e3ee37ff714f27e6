//! Merge-on-read ("realtime") splits.
//!
//! A realtime split reads a base file and merges the records of its delta log files on top,
//! up to the max commit time.
use std::any::Any;
use std::sync::Arc;

use lakesplit_core::{FileSplit, Split, SplitConverter, SplitInfo, SplitRef, SplitResult};

use crate::{
    HUDI_BASEPATH_KEY, HUDI_DELTA_FILEPATHS_KEY, HUDI_MAX_COMMIT_TIME_KEY, REALTIME_SPLIT_CLASS,
};

/// A split over a Hudi merge-on-read file slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudiRealtimeSplit {
    split: FileSplit,
    base_path: String,
    delta_log_paths: Vec<String>,
    max_commit_time: String,
}

impl HudiRealtimeSplit {
    pub fn new(
        split: FileSplit,
        base_path: impl Into<String>,
        delta_log_paths: Vec<String>,
        max_commit_time: impl Into<String>,
    ) -> Self {
        Self {
            split,
            base_path: base_path.into(),
            delta_log_paths,
            max_commit_time: max_commit_time.into(),
        }
    }

    /// Root path of the Hudi table.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Delta log files to merge, in merge order.
    pub fn delta_log_paths(&self) -> &[String] {
        &self.delta_log_paths
    }

    /// Commit time watermark, kept as the opaque string Hudi produced.
    pub fn max_commit_time(&self) -> &str {
        &self.max_commit_time
    }

    pub fn into_file_split(self) -> FileSplit {
        self.split
    }

    /// Write the realtime fields into `info`.
    pub(crate) fn encode_fields(&self, info: &mut SplitInfo) {
        info.insert_list(HUDI_DELTA_FILEPATHS_KEY, &self.delta_log_paths);
        info.insert(HUDI_BASEPATH_KEY, self.base_path.clone());
        info.insert(HUDI_MAX_COMMIT_TIME_KEY, self.max_commit_time.clone());
    }

    /// Read the realtime fields from `info`, wrapping `split`.
    pub(crate) fn decode_fields(split: &FileSplit, info: &SplitInfo) -> SplitResult<Self> {
        Ok(Self {
            split: split.clone(),
            base_path: info.require(HUDI_BASEPATH_KEY)?.to_string(),
            delta_log_paths: info.get_list(HUDI_DELTA_FILEPATHS_KEY),
            max_commit_time: info.require(HUDI_MAX_COMMIT_TIME_KEY)?.to_string(),
        })
    }
}

impl Split for HudiRealtimeSplit {
    fn file_split(&self) -> &FileSplit {
        &self.split
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// [`SplitConverter`] for [`HudiRealtimeSplit`]s.
#[derive(Clone, Default, Debug)]
pub struct HudiRealtimeSplitConverter {}

impl SplitConverter for HudiRealtimeSplitConverter {
    fn format_tag(&self) -> &str {
        REALTIME_SPLIT_CLASS
    }

    fn recognizes(&self, split: &dyn Split) -> bool {
        split.is::<HudiRealtimeSplit>()
    }

    fn try_encode(&self, split: &dyn Split) -> Option<SplitInfo> {
        let split = split.downcast_ref::<HudiRealtimeSplit>()?;
        let mut info = SplitInfo::new(REALTIME_SPLIT_CLASS);
        split.encode_fields(&mut info);
        Some(info)
    }

    fn try_decode(&self, split: &FileSplit, info: &SplitInfo) -> SplitResult<Option<SplitRef>> {
        if !self.claims(info) {
            return Ok(None);
        }
        let split = HudiRealtimeSplit::decode_fields(split, info)?;
        Ok(Some(Arc::new(split)))
    }
}
