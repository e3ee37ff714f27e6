//! Hudi support for lakesplit.
//!
//! Hudi merge-on-read tables are scanned through realtime splits: a base file plus the delta log
//! files to merge on top of it, up to a commit time watermark. The converters in this crate carry
//! those fields through the custom split info slot of a generic [`FileSplit`].
//!
//! The key names and format tags match what Presto's Hive connector writes, so split info
//! produced by either side decodes on the other.
use std::sync::Arc;

use lakesplit_core::ConverterRegistry;
#[cfg(doc)]
use lakesplit_core::{FileSplit, SplitConverter};

mod bootstrap;
pub(crate) mod error;
mod realtime;

pub use bootstrap::{HudiBootstrapSplit, HudiBootstrapSplitConverter};
pub use realtime::{HudiRealtimeSplit, HudiRealtimeSplitConverter};

/// Format tag of [`HudiRealtimeSplit`]s.
pub const REALTIME_SPLIT_CLASS: &str = "org.apache.hudi.hadoop.realtime.HoodieRealtimeFileSplit";
/// Format tag of [`HudiBootstrapSplit`]s.
pub const BOOTSTRAP_SPLIT_CLASS: &str =
    "org.apache.hudi.hadoop.realtime.RealtimeBootstrapBaseFileSplit";

pub const HUDI_DELTA_FILEPATHS_KEY: &str = "hudi_delta_filepaths";
pub const HUDI_BASEPATH_KEY: &str = "hudi_basepath";
pub const HUDI_MAX_COMMIT_TIME_KEY: &str = "hudi_max_commit_time";
pub const HUDI_BOOTSTRAP_SPLIT_PATH_KEY: &str = "hudi_bootstrap_split_path";
pub const HUDI_BOOTSTRAP_SPLIT_START_KEY: &str = "hudi_bootstrap_split_start";
pub const HUDI_BOOTSTRAP_SPLIT_LEN_KEY: &str = "hudi_bootstrap_split_len";

/// Register the Hudi [SplitConverter]s with `registry`
pub fn register_handlers(registry: &mut ConverterRegistry) {
    registry
        .register(Arc::new(HudiRealtimeSplitConverter::default()))
        .register(Arc::new(HudiBootstrapSplitConverter::default()));
}
