//! Common type definitions shared between the HTTP layer and validation.
//!
//! - [`UploadedFile`]: one inbound file, alive for the duration of a single request
//! - [`TabularFormat`]: how a tabular upload should be parsed

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single uploaded file as handed over by the transport.
///
/// The declared size and content type come from the client side of the transport and are
/// never cross-checked against `content`. The value is owned by the handler serving the
/// request and dropped when it returns.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub declared_size: u64,
    pub declared_content_type: Option<String>,
    pub content: Bytes,
}

impl UploadedFile {
    /// Build a file whose declared size is the length of its content, as the multipart
    /// extractor reports it.
    pub fn new(filename: Option<String>, declared_content_type: Option<String>, content: Bytes) -> Self {
        Self {
            filename,
            declared_size: content.len() as u64,
            declared_content_type,
            content,
        }
    }
}

// Supported tabular encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabularFormat {
    Csv,
    /// Any workbook container calamine can detect (xlsx, xlsm, xlsb, xls, ods)
    Spreadsheet,
}

impl fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabularFormat::Csv => write!(f, "CSV"),
            TabularFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}
