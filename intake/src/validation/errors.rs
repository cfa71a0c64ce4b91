use crate::types::TabularFormat;
use thiserror::Error;

/// Reasons an upload is turned away by the validation layer.
///
/// The messages of the first two variants are returned to clients verbatim, so they are kept
/// stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Declared size is above the endpoint's limit
    #[error("File too large.")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// Filename or declared content type is outside the endpoint's whitelist
    #[error("File type not supported.")]
    UnsupportedType { found: Option<String> },

    /// Content could not be parsed into a table
    #[error("Malformed {format} input: {reason}")]
    MalformedInput { format: TabularFormat, reason: String },
}

impl UploadError {
    pub(crate) fn malformed(format: TabularFormat, reason: impl Into<String>) -> Self {
        UploadError::MalformedInput {
            format,
            reason: reason.into(),
        }
    }
}
