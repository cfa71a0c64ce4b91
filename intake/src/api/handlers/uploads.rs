use crate::api::models::uploads::{UploadForm, UploadResponse};
use crate::errors::{Error, ErrorResponse, Result};
use crate::types::{TabularFormat, UploadedFile};
use crate::validation;
use axum::{Json, http::StatusCode};

#[utoipa::path(
    post,
    path = "/upload-csv",
    tag = "uploads",
    summary = "Upload CSV file",
    description = "Parses the whole file as CSV. The first row is the header. No size or type restriction applies.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 422, description = "Body is not a multipart form with a `file` field", body = ErrorResponse),
        (status = 500, description = "File is not well-formed CSV", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_csv(file: UploadedFile) -> Result<Json<UploadResponse>> {
    accept_tabular(&file, TabularFormat::Csv)
}

#[utoipa::path(
    post,
    path = "/upload-excel",
    tag = "uploads",
    summary = "Upload spreadsheet",
    description = "Parses the first worksheet of a workbook (xlsx, xls, xlsb or ods). The first row is the header. \
        No size or type restriction applies.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 422, description = "Body is not a multipart form with a `file` field", body = ErrorResponse),
        (status = 500, description = "File is not a readable workbook", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_excel(file: UploadedFile) -> Result<Json<UploadResponse>> {
    accept_tabular(&file, TabularFormat::Spreadsheet)
}

// Parse failures surface as 500s, the same as an unhandled error in the service this replaces.
fn accept_tabular(file: &UploadedFile, format: TabularFormat) -> Result<Json<UploadResponse>> {
    validation::accept_tabular_file(file, format).map_err(Error::upload(StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(UploadResponse::accepted()))
}

#[utoipa::path(
    post,
    path = "/upload-file",
    tag = "uploads",
    summary = "Upload text file",
    description = "Accepts files of at most 4096 bytes whose name ends in `.txt`. \
        Both rejections are reported with status 404.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 404, description = "File too large, or file type not supported", body = ErrorResponse),
        (status = 422, description = "Body is not a multipart form with a `file` field", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_text_file(file: UploadedFile) -> Result<Json<UploadResponse>> {
    // NOTE: 404 is not the right status for either rejection (413 and 415 would be), but existing
    // clients match on it, so it stays until they are migrated.
    validation::accept_text_file(&file).map_err(Error::upload(StatusCode::NOT_FOUND))?;
    Ok(Json(UploadResponse::accepted()))
}

#[utoipa::path(
    post,
    path = "/upload-image",
    tag = "uploads",
    summary = "Upload image",
    description = "Accepts files whose declared content type is png, jpg or jpeg. The image bytes are not inspected.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 422, description = "File type not supported, or body is not a multipart form with a `file` field", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_image(file: UploadedFile) -> Result<Json<UploadResponse>> {
    validation::accept_image_file(&file).map_err(Error::upload(StatusCode::UNPROCESSABLE_ENTITY))?;
    Ok(Json(UploadResponse::accepted()))
}
