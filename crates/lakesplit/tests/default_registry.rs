//! Smoke tests ensuring table formats register their converters when the corresponding feature
//! is enabled.

use std::collections::HashMap;
use std::sync::Arc;

use lakesplit::{default_registry, registry_with_config, CodecConfig, FileSplit, SplitCodecError};
use pretty_assertions::assert_eq;

#[test]
fn default_registry_is_shared() {
    assert!(Arc::ptr_eq(&default_registry(), &default_registry()));
}

#[test]
fn plain_split_roundtrip() {
    let registry = default_registry();
    let split = FileSplit::new("/tbl/part-0.parquet", 0, 64);
    let restored = registry.restore(registry.attach(&split)).unwrap();
    assert_eq!(restored.downcast_ref::<FileSplit>(), Some(&split));
}

#[test]
fn config_from_options() {
    let options = HashMap::from([("split_codec.unknown_format", "reject")]);
    let registry = registry_with_config(CodecConfig::parse_options(options).unwrap());

    let mut info = lakesplit::SplitInfo::new("org.example.Unregistered");
    info.insert("k", "v");
    let err = registry
        .decode(FileSplit::new("/tbl/f", 0, 1), Some(&info))
        .unwrap_err();
    assert!(matches!(err, SplitCodecError::UnknownFormat { .. }));
}

#[cfg(feature = "hudi")]
mod hudi {
    use lakesplit::hudi::{HudiRealtimeSplit, BOOTSTRAP_SPLIT_CLASS, REALTIME_SPLIT_CLASS};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registers_hudi_converters() {
        assert_eq!(
            default_registry().format_tags(),
            vec![REALTIME_SPLIT_CLASS, BOOTSTRAP_SPLIT_CLASS]
        );
    }

    #[test]
    fn hudi_split_roundtrip() {
        let registry = default_registry();
        let split = HudiRealtimeSplit::new(
            FileSplit::new("/tbl/base", 0, 1024),
            "/tbl/base",
            vec!["/tbl/.log/1".to_string(), "/tbl/.log/2".to_string()],
            "20230101000000",
        );

        let wire = registry.attach(&split);
        assert!(wire.custom_split_info().is_some());

        let restored = registry.restore(wire).unwrap();
        assert_eq!(restored.downcast_ref::<HudiRealtimeSplit>(), Some(&split));
        assert!(restored.file_split().custom_split_info().is_none());
    }

    #[test]
    fn disabled_formats_are_skipped() {
        let options = HashMap::from([(
            "split_codec.disabled_formats".to_string(),
            format!("{REALTIME_SPLIT_CLASS},{BOOTSTRAP_SPLIT_CLASS}"),
        )]);
        let registry = registry_with_config(CodecConfig::parse_options(options).unwrap());
        assert!(registry.is_empty());
    }
}

#[cfg(not(feature = "hudi"))]
#[test]
fn no_formats_without_features() {
    assert!(default_registry().is_empty());
}
