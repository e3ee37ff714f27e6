use lakesplit_core::SplitCodecError;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("bootstrap split range starting at {start} with length {length} overflows")]
    BootstrapRangeOverflow { start: u64, length: u64 },

    #[error(transparent)]
    Codec(#[from] SplitCodecError),
}

impl From<Error> for SplitCodecError {
    fn from(e: Error) -> Self {
        match e {
            Error::Codec(e) => e,
            overflow @ Error::BootstrapRangeOverflow { length, .. } => {
                SplitCodecError::InvalidField {
                    format: crate::BOOTSTRAP_SPLIT_CLASS.to_string(),
                    key: crate::HUDI_BOOTSTRAP_SPLIT_LEN_KEY.to_string(),
                    value: length.to_string(),
                    source: Box::new(overflow),
                }
            }
        }
    }
}
