//! Configuration for the split codec.
//!
//! All configuration is parsed from String -> String mappings, so it can be passed through the
//! same session/catalog properties the surrounding engine already forwards.
//!
//! [`CodecConfig`] picks the keys it knows through [`TryUpdateKey`] and leaves the rest to
//! whoever else reads the same options.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::info::LIST_DELIMITER;
use crate::{SplitCodecError, SplitResult};

/// Policy for unknown formats, see [`UnknownFormatPolicy`].
pub const UNKNOWN_FORMAT_KEY: &str = "split_codec.unknown_format";
/// Comma separated format tags whose converters are not registered.
pub const DISABLED_FORMATS_KEY: &str = "split_codec.disabled_formats";

/// A configuration that can be assembled one option at a time.
pub trait TryUpdateKey: Default {
    /// Apply `value` to the field named by `key`.
    ///
    /// Returns `Ok(None)` when `key` is not one of this configuration's options, and an error
    /// when it is but `value` does not parse.
    fn try_update_key(&mut self, key: &str, value: &str) -> SplitResult<Option<()>>;
}

/// Outcome of applying a set of options to a [`TryUpdateKey`] configuration.
#[derive(Debug, Default)]
pub struct ParsedOptions<T> {
    pub config: T,
    /// Options no field of `config` claimed.
    pub ignored: HashMap<String, String>,
    /// Claimed options whose value was rejected, with the reason.
    pub errors: Vec<(String, String)>,
}

impl<T: TryUpdateKey> ParsedOptions<T> {
    /// Apply every option, collecting failures instead of stopping at the first one.
    pub fn parse<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str> + Into<String>,
        V: AsRef<str> + Into<String>,
    {
        options
            .into_iter()
            .fold(Self::default(), |mut parsed, (key, value)| {
                match parsed.config.try_update_key(key.as_ref(), value.as_ref()) {
                    Ok(Some(())) => {}
                    Ok(None) => {
                        parsed.ignored.insert(key.into(), value.into());
                    }
                    Err(err) => parsed.errors.push((key.into(), err.to_string())),
                }
                parsed
            })
    }

    /// The parsed configuration, or [`SplitCodecError::InvalidConfig`] listing every rejected
    /// option.
    pub fn into_config(self) -> SplitResult<T> {
        if self.errors.is_empty() {
            Ok(self.config)
        } else {
            Err(SplitCodecError::InvalidConfig {
                errors: self.errors,
            })
        }
    }
}

/// What [`decode`](crate::ConverterRegistry::decode) does with a format tag no converter claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFormatPolicy {
    /// Hand back the generic split unchanged.
    #[default]
    PassThrough,
    /// Fail with [`SplitCodecError::UnknownFormat`].
    Reject,
}

impl FromStr for UnknownFormatPolicy {
    type Err = SplitCodecError;

    fn from_str(s: &str) -> SplitResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pass_through" | "passthrough" => Ok(Self::PassThrough),
            "reject" => Ok(Self::Reject),
            _ => Err(SplitCodecError::Generic(format!(
                "unknown format policy '{s}', expected 'pass_through' or 'reject'"
            ))),
        }
    }
}

impl fmt::Display for UnknownFormatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass_through"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Handling of format tags without a registered converter.
    pub unknown_format: UnknownFormatPolicy,

    /// Format tags whose converters are skipped at registration.
    pub disabled_formats: Vec<String>,
}

impl TryUpdateKey for CodecConfig {
    fn try_update_key(&mut self, key: &str, value: &str) -> SplitResult<Option<()>> {
        match key {
            UNKNOWN_FORMAT_KEY => self.unknown_format = value.parse()?,
            DISABLED_FORMATS_KEY => {
                self.disabled_formats = value
                    .split(LIST_DELIMITER)
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(String::from)
                    .collect()
            }
            _ => return Ok(None),
        }
        Ok(Some(()))
    }
}

impl CodecConfig {
    /// Parse the codec configuration from a set of options.
    ///
    /// Keys not belonging to the codec are ignored.
    pub fn parse_options<K, V, I>(options: I) -> SplitResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str> + Into<String>,
        V: AsRef<str> + Into<String>,
    {
        ParsedOptions::parse(options).into_config()
    }

    pub fn with_unknown_format(mut self, policy: UnknownFormatPolicy) -> Self {
        self.unknown_format = policy;
        self
    }

    pub fn with_disabled_format(mut self, format: impl Into<String>) -> Self {
        self.disabled_formats.push(format.into());
        self
    }

    /// Whether converters for `format` should be left out of the registry.
    pub fn is_disabled(&self, format: &str) -> bool {
        self.disabled_formats.iter().any(|tag| tag == format)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.unknown_format, UnknownFormatPolicy::PassThrough);
        assert!(config.disabled_formats.is_empty());
        assert!(!config.is_disabled("anything"));
    }

    #[test]
    fn test_parse_options() {
        let options = HashMap::from([
            (UNKNOWN_FORMAT_KEY, "Reject"),
            (DISABLED_FORMATS_KEY, "a.Format, b.Format,"),
            ("some_other_key", "value"),
        ]);
        let config = CodecConfig::parse_options(options).unwrap();
        assert_eq!(config.unknown_format, UnknownFormatPolicy::Reject);
        assert_eq!(config.disabled_formats, vec!["a.Format", "b.Format"]);
        assert!(config.is_disabled("b.Format"));
    }

    #[test]
    fn test_parsed_options_collects_failures() {
        let options = HashMap::from([
            (UNKNOWN_FORMAT_KEY.to_string(), "sometimes".to_string()),
            (DISABLED_FORMATS_KEY.to_string(), "a.Format".to_string()),
            ("unknown_key".to_string(), "value".to_string()),
        ]);

        let parsed = ParsedOptions::<CodecConfig>::parse(options);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].0, UNKNOWN_FORMAT_KEY);
        assert_eq!(parsed.ignored.get("unknown_key").map(String::as_str), Some("value"));
        assert!(parsed.config.is_disabled("a.Format"));
        assert!(matches!(
            parsed.into_config(),
            Err(SplitCodecError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for policy in [UnknownFormatPolicy::PassThrough, UnknownFormatPolicy::Reject] {
            assert_eq!(policy.to_string().parse::<UnknownFormatPolicy>().unwrap(), policy);
        }
    }
}
