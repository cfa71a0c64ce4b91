//! Upload validation rules.
//!
//! Each `accept_*` function inspects exactly one [`UploadedFile`] and either accepts it or
//! returns an [`UploadError`]. The functions are stateless and independent of each other;
//! mapping a rejection to an HTTP status is left to the handlers in
//! [`crate::api::handlers::uploads`].
//!
//! The limits below are fixed and are not part of the configuration surface.

pub mod errors;
pub mod tabular;

pub use errors::UploadError;
pub use tabular::Table;

use crate::types::{TabularFormat, UploadedFile};
use tracing::{debug, instrument};

/// Largest accepted declared size for plain text uploads, in bytes (4 KiB)
pub const MAX_TEXT_FILE_SIZE: u64 = 4 * 1024;

/// Required filename suffix for plain text uploads. Case-sensitive.
pub const TEXT_FILE_SUFFIX: &str = ".txt";

/// Accepted image subtypes, compared against the lower-cased declared content type
pub const ACCEPTED_IMAGE_SUBTYPES: [&str; 3] = ["png", "jpg", "jpeg"];

/// Parse the whole upload as a table in the given format.
///
/// No size or type restriction applies here. The parsed table is only used to prove the
/// content is well formed and is dropped before returning.
#[instrument(skip(file), fields(filename = ?file.filename, size = file.declared_size))]
pub fn accept_tabular_file(file: &UploadedFile, format: TabularFormat) -> Result<(), UploadError> {
    let table = tabular::parse(&file.content, format)?;

    debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        "Parsed {} upload",
        format
    );

    Ok(())
}

/// Check size and extension of a plain text upload.
///
/// The size check runs first, so a file failing both checks reports only the size failure.
/// A missing filename is treated as not having the required suffix. Content is never read.
#[instrument(skip(file), fields(filename = ?file.filename, size = file.declared_size))]
pub fn accept_text_file(file: &UploadedFile) -> Result<(), UploadError> {
    if file.declared_size > MAX_TEXT_FILE_SIZE {
        return Err(UploadError::PayloadTooLarge {
            size: file.declared_size,
            limit: MAX_TEXT_FILE_SIZE,
        });
    }

    let has_text_suffix = file.filename.as_deref().is_some_and(|name| name.ends_with(TEXT_FILE_SUFFIX));
    if !has_text_suffix {
        return Err(UploadError::UnsupportedType {
            found: file.filename.clone(),
        });
    }

    Ok(())
}

/// Check the declared content type of an image upload.
///
/// Only the declared type is inspected; the bytes are never decoded.
#[instrument(skip(file), fields(content_type = ?file.declared_content_type))]
pub fn accept_image_file(file: &UploadedFile) -> Result<(), UploadError> {
    let accepted = file
        .declared_content_type
        .as_deref()
        .map(image_subtype)
        .is_some_and(|subtype| ACCEPTED_IMAGE_SUBTYPES.contains(&subtype.as_str()));

    if !accepted {
        return Err(UploadError::UnsupportedType {
            found: file.declared_content_type.clone(),
        });
    }

    Ok(())
}

/// Lower-cased text after the last `/`, or the whole value when there is none
fn image_subtype(content_type: &str) -> String {
    content_type.rsplit('/').next().unwrap_or_default().to_lowercase()
}
