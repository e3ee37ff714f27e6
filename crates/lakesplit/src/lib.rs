//! The lakesplit crate is a meta-package shim for lakesplit-core and the table format crates.
//!
//! # Optional cargo package features
//!
//! - `hudi` (default) - register the Hudi merge-on-read split converters.
use std::sync::{Arc, OnceLock};

use tracing::debug;

pub use lakesplit_core::*;

#[cfg(feature = "hudi")]
pub use lakesplit_hudi as hudi;

/// Build a registry holding the converters of every enabled table format.
///
/// Formats are registered in a fixed order, so dispatch is deterministic across processes.
pub fn registry_with_config(config: CodecConfig) -> ConverterRegistry {
    #[allow(unused_mut)]
    let mut registry = ConverterRegistry::with_config(config);
    #[cfg(feature = "hudi")]
    hudi::register_handlers(&mut registry);
    debug!(formats = ?registry.format_tags(), "built split converter registry");
    registry
}

/// Access the process wide registry with default configuration.
///
/// The registry is built on first access and shared read-only afterwards.
pub fn default_registry() -> Arc<ConverterRegistry> {
    static REGISTRY: OnceLock<Arc<ConverterRegistry>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| Arc::new(registry_with_config(CodecConfig::default())))
        .clone()
}
