//! Ordered dispatch over the registered [`SplitConverter`]s.
//!
//! The registry is assembled once at startup and then shared read-only (typically behind an
//! [`Arc`]); encode and decode take `&self` and never lock. Converters are consulted in
//! registration order and the first one to answer wins.
use std::sync::Arc;

use tracing::debug;

use crate::config::{CodecConfig, UnknownFormatPolicy};
use crate::converter::SplitConverter;
use crate::info::SplitInfo;
use crate::split::{FileSplit, Split, SplitRef};
use crate::{SplitCodecError, SplitResult};

#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn SplitConverter>>,
    config: CodecConfig,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry honouring `config`.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            converters: Vec::new(),
            config,
        }
    }

    /// Append a converter. Converters registered earlier take precedence.
    ///
    /// Converters whose format is disabled in the [`CodecConfig`] are skipped.
    pub fn register(&mut self, converter: Arc<dyn SplitConverter>) -> &mut Self {
        if self.config.is_disabled(converter.format_tag()) {
            debug!(format = converter.format_tag(), "split converter disabled, skipping");
            return self;
        }
        debug!(
            format = converter.format_tag(),
            position = self.converters.len(),
            "registering split converter"
        );
        self.converters.push(converter);
        self
    }

    /// Builder style variant of [`ConverterRegistry::register`].
    pub fn with_converter(mut self, converter: Arc<dyn SplitConverter>) -> Self {
        self.register(converter);
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Format tags of the registered converters, in dispatch order.
    pub fn format_tags(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.format_tag()).collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Whether any registered converter handles `split`.
    pub fn recognizes(&self, split: &dyn Split) -> bool {
        self.converters.iter().any(|c| c.recognizes(split))
    }

    /// Flatten the format specific data of `split`, if any converter recognizes it.
    ///
    /// Returns `None` for plain splits, which is the common case.
    pub fn encode(&self, split: &dyn Split) -> Option<SplitInfo> {
        self.converters.iter().find_map(|converter| {
            let info = converter.try_encode(split)?;
            debug!(
                format = converter.format_tag(),
                path = split.file_split().path(),
                "encoded custom split info"
            );
            Some(info)
        })
    }

    /// Rebuild a typed split from `split` and the info that travelled with it.
    ///
    /// Without info, or when no converter claims the info's format, `split` is returned as is
    /// (unless the config rejects unknown formats). Errors from the claiming converter are
    /// propagated without trying further converters.
    pub fn decode(&self, split: FileSplit, info: Option<&SplitInfo>) -> SplitResult<SplitRef> {
        let Some(info) = info else {
            return Ok(Arc::new(split));
        };
        if let Some(decoded) = self.claim(&split, info)? {
            return Ok(decoded);
        }
        self.check_unclaimed(&split, info)?;
        Ok(Arc::new(split))
    }

    /// Let the first converter claiming `info` rebuild the split.
    fn claim(&self, split: &FileSplit, info: &SplitInfo) -> SplitResult<Option<SplitRef>> {
        for converter in &self.converters {
            if let Some(decoded) = converter.try_decode(split, info)? {
                debug!(
                    format = converter.format_tag(),
                    path = split.path(),
                    "decoded custom split info"
                );
                return Ok(Some(decoded));
            }
        }
        Ok(None)
    }

    fn check_unclaimed(&self, split: &FileSplit, info: &SplitInfo) -> SplitResult<()> {
        match self.config.unknown_format {
            UnknownFormatPolicy::PassThrough => {
                debug!(
                    format = info.format(),
                    path = split.path(),
                    "no converter for custom split info, passing split through"
                );
                Ok(())
            }
            UnknownFormatPolicy::Reject => Err(SplitCodecError::UnknownFormat {
                format: info.format().to_string(),
            }),
        }
    }

    /// Produce the generic split to hand to the transport boundary.
    ///
    /// The format specific data of `split`, if any, is placed in the custom split info slot.
    pub fn attach(&self, split: &dyn Split) -> FileSplit {
        let file_split = split.file_split().clone();
        match self.encode(split) {
            Some(info) => file_split.with_custom_split_info(info),
            None => file_split,
        }
    }

    /// Rebuild a split received from the transport boundary.
    ///
    /// An empty custom split info slot is treated like an absent one. A decoded split wraps the
    /// generic split with its slot emptied, so it compares equal to the split that was attached.
    /// Splits no converter claims keep their slot, so they can be forwarded as received.
    pub fn restore(&self, mut split: FileSplit) -> SplitResult<SplitRef> {
        if split
            .custom_split_info()
            .map_or(true, |entries| entries.is_empty())
        {
            return Ok(Arc::new(split));
        }
        let Some(entries) = split.take_custom_split_info() else {
            return Ok(Arc::new(split));
        };
        let info = SplitInfo::try_from(entries)?;
        if let Some(decoded) = self.claim(&split, &info)? {
            return Ok(decoded);
        }
        self.check_unclaimed(&split, &info)?;
        Ok(Arc::new(split.with_custom_split_info(info)))
    }
}
