//! Exceptions for the lakesplit crates

/// A result returned by the split codec
pub type SplitResult<T, E = SplitCodecError> = Result<T, E>;

/// Errors raised while encoding or decoding custom split info
#[derive(thiserror::Error, Debug)]
pub enum SplitCodecError {
    /// A caller handed in an argument that violates the codec contract.
    ///
    /// This is a programming error on the caller side and should not be retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The format tag matched a converter, but a field it requires is absent.
    #[error("Malformed split info for format '{format}': missing required key '{key}'")]
    MissingField {
        /// Format tag of the converter that claimed the split info.
        format: String,
        /// Key that was expected in the split info.
        key: String,
    },

    /// The format tag matched a converter, but a field could not be interpreted.
    #[error("Malformed split info for format '{format}': invalid value `{value}` for key '{key}': {source}")]
    InvalidField {
        /// Format tag of the converter that claimed the split info.
        format: String,
        /// Key holding the offending value.
        key: String,
        /// The raw value found in the split info.
        value: String,
        /// Source error details.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// No registered converter claims the format tag and the registry rejects unknown formats.
    #[error("No split converter registered for format '{format}'")]
    UnknownFormat {
        /// The unclaimed format tag.
        format: String,
    },

    /// Error returned when the codec configuration could not be parsed.
    #[error("Failed to parse split codec config: {errors:?}")]
    InvalidConfig {
        /// Offending keys and the reason they were rejected.
        errors: Vec<(String, String)>,
    },

    /// Error returned when a split could not be (de)serialized for transport.
    #[error("Invalid JSON in split payload: {}", .json_err)]
    InvalidJson {
        /// JSON error details.
        #[from]
        json_err: serde_json::Error,
    },

    /// Generic error
    #[error("Generic split codec error: {0}")]
    Generic(String),
}

impl SplitCodecError {
    /// Shorthand for a [`SplitCodecError::MissingField`].
    pub fn missing_field(format: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingField {
            format: format.into(),
            key: key.into(),
        }
    }

    /// Whether the error was caused by split info that claims a format but is malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidField { .. })
    }
}
