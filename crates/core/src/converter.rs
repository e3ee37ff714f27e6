//! The capability contract implemented once per table format.
use crate::info::SplitInfo;
use crate::split::{FileSplit, Split, SplitRef};
use crate::SplitResult;

/// Converts a format specific split to and from flat [`SplitInfo`].
///
/// Converters are stateless and are registered once with a
/// [`ConverterRegistry`](crate::ConverterRegistry) at process start. Neither method may have
/// side effects.
pub trait SplitConverter: std::fmt::Debug + Send + Sync {
    /// Unique identifier written under [`CUSTOM_SPLIT_CLASS_KEY`](crate::CUSTOM_SPLIT_CLASS_KEY).
    fn format_tag(&self) -> &str;

    /// Whether `split` is, or wraps, the typed split this converter handles.
    fn recognizes(&self, split: &dyn Split) -> bool;

    /// Flatten the format specific fields of `split`.
    ///
    /// Returns `None` for any split this converter does not recognize. When `Some`, the info is
    /// tagged with [`SplitConverter::format_tag`] and holds one entry per typed field.
    fn try_encode(&self, split: &dyn Split) -> Option<SplitInfo>;

    /// Rebuild the typed split wrapping `split` from `info`.
    ///
    /// Returns `Ok(None)` if `info` was produced by another format. Fails if the format tag
    /// matches but a field this converter requires is missing or cannot be parsed.
    fn try_decode(&self, split: &FileSplit, info: &SplitInfo) -> SplitResult<Option<SplitRef>>;

    /// Whether `info` carries this converter's format tag.
    fn claims(&self, info: &SplitInfo) -> bool {
        info.is_format(self.format_tag())
    }
}
