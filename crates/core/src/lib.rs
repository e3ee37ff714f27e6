//! Carry table-format specific split metadata across generic split boundaries.
//!
//! A query engine schedules work as generic [`FileSplit`]s. Table formats such as Hudi attach
//! extra data to a split (base path, delta logs to merge, commit watermark) that the generic
//! shape cannot hold. Before a split crosses a process boundary, a [`ConverterRegistry`]
//! flattens that data into [`SplitInfo`], a string map stored in the split's custom split info
//! slot. On the receiving side the registry detects the producing format and rebuilds the
//! typed split before any reader opens it.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lakesplit_core::{ConverterRegistry, FileSplit};
//!
//! let registry = Arc::new(ConverterRegistry::new());
//! let split = FileSplit::new("/tbl/part-0.parquet", 0, 1024);
//!
//! // plain splits carry no custom split info and pass through unchanged
//! let wire = registry.attach(&split);
//! assert!(wire.custom_split_info().is_none());
//! let restored = registry.restore(wire).unwrap();
//! assert_eq!(restored.downcast_ref::<FileSplit>(), Some(&split));
//! ```
//!
//! Format support lives in separate crates (e.g. `lakesplit-hudi`) which expose a
//! `register_handlers` function adding their converters to a registry.

pub mod config;
pub mod converter;
pub mod errors;
pub mod info;
pub mod registry;
pub mod split;

pub use self::config::{CodecConfig, UnknownFormatPolicy};
pub use self::converter::SplitConverter;
pub use self::errors::{SplitCodecError, SplitResult};
pub use self::info::{SplitInfo, CUSTOM_SPLIT_CLASS_KEY, LIST_DELIMITER};
pub use self::registry::ConverterRegistry;
pub use self::split::{FileSplit, Split, SplitRef};
