//! Realtime splits over bootstrapped base files.
//!
//! Tables bootstrapped from existing data keep only a skeleton base file (record keys and Hudi
//! meta columns); the data columns stay in the external bootstrap file. Readers stitch both
//! together before merging the delta logs, so the split also has to carry the bootstrap file
//! range.
use std::any::Any;
use std::sync::Arc;

use lakesplit_core::{FileSplit, Split, SplitConverter, SplitInfo, SplitRef, SplitResult};
use tracing::debug;

use crate::error::{Error, Result};
use crate::realtime::HudiRealtimeSplit;
use crate::{
    BOOTSTRAP_SPLIT_CLASS, HUDI_BOOTSTRAP_SPLIT_LEN_KEY, HUDI_BOOTSTRAP_SPLIT_PATH_KEY,
    HUDI_BOOTSTRAP_SPLIT_START_KEY,
};

/// A [`HudiRealtimeSplit`] whose base file is a bootstrap skeleton file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudiBootstrapSplit {
    realtime: HudiRealtimeSplit,
    bootstrap_split: FileSplit,
}

impl HudiBootstrapSplit {
    pub fn new(realtime: HudiRealtimeSplit, bootstrap_split: FileSplit) -> Self {
        Self {
            realtime,
            bootstrap_split,
        }
    }

    /// The merge-on-read part of the split.
    pub fn realtime(&self) -> &HudiRealtimeSplit {
        &self.realtime
    }

    /// Range of the external bootstrap data file.
    pub fn bootstrap_split(&self) -> &FileSplit {
        &self.bootstrap_split
    }
}

impl Split for HudiBootstrapSplit {
    fn file_split(&self) -> &FileSplit {
        self.realtime.file_split()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn decode_bootstrap_split(info: &SplitInfo) -> Result<FileSplit> {
    let path = info.require(HUDI_BOOTSTRAP_SPLIT_PATH_KEY)?;
    let start: u64 = info.parse(HUDI_BOOTSTRAP_SPLIT_START_KEY)?;
    let length: u64 = info.parse(HUDI_BOOTSTRAP_SPLIT_LEN_KEY)?;
    if start.checked_add(length).is_none() {
        debug!(path, start, length, "rejecting overflowing bootstrap split range");
        return Err(Error::BootstrapRangeOverflow { start, length });
    }
    Ok(FileSplit::new(path, start, length))
}

/// [`SplitConverter`] for [`HudiBootstrapSplit`]s.
#[derive(Clone, Default, Debug)]
pub struct HudiBootstrapSplitConverter {}

impl SplitConverter for HudiBootstrapSplitConverter {
    fn format_tag(&self) -> &str {
        BOOTSTRAP_SPLIT_CLASS
    }

    fn recognizes(&self, split: &dyn Split) -> bool {
        split.is::<HudiBootstrapSplit>()
    }

    fn try_encode(&self, split: &dyn Split) -> Option<SplitInfo> {
        let split = split.downcast_ref::<HudiBootstrapSplit>()?;
        let mut info = SplitInfo::new(BOOTSTRAP_SPLIT_CLASS);
        split.realtime.encode_fields(&mut info);
        info.insert(
            HUDI_BOOTSTRAP_SPLIT_PATH_KEY,
            split.bootstrap_split.path().to_string(),
        );
        info.insert(
            HUDI_BOOTSTRAP_SPLIT_START_KEY,
            split.bootstrap_split.start().to_string(),
        );
        info.insert(
            HUDI_BOOTSTRAP_SPLIT_LEN_KEY,
            split.bootstrap_split.length().to_string(),
        );
        Some(info)
    }

    fn try_decode(&self, split: &FileSplit, info: &SplitInfo) -> SplitResult<Option<SplitRef>> {
        if !self.claims(info) {
            return Ok(None);
        }
        let realtime = HudiRealtimeSplit::decode_fields(split, info)?;
        let bootstrap_split = decode_bootstrap_split(info)?;
        Ok(Some(Arc::new(HudiBootstrapSplit::new(
            realtime,
            bootstrap_split,
        ))))
    }
}
