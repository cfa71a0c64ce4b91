//! Request extractor producing an [`UploadedFile`] from a `multipart/form-data` body.
//!
//! The first part named `file` becomes the upload; every other part is skipped. A body that is
//! not multipart, has no `file` part, or carries `file` as a plain value without a filename is
//! rejected with 422. A stream that breaks while being
//! read is rejected with 400, or 413 when it ran into the configured body limit.

use crate::errors::{Error, Result};
use crate::types::UploadedFile;
use axum::{
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::StatusCode,
};
use tracing::{debug, instrument};

/// Name of the multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

impl<S> FromRequest<S> for UploadedFile
where
    S: Send + Sync,
{
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| Error::InvalidForm {
            message: format!("Expected a multipart/form-data body: {}", e.body_text()),
        })?;

        while let Some(field) = multipart.next_field().await.map_err(read_error)? {
            if field.name() != Some(FILE_FIELD) {
                debug!(field = ?field.name(), "Skipping unrelated multipart field");
                continue;
            }

            let Some(filename) = field.file_name().map(str::to_string) else {
                return Err(Error::InvalidForm {
                    message: format!("Expected an uploaded file in field '{FILE_FIELD}', got a plain form value"),
                });
            };
            let content_type = field.content_type().map(str::to_string);
            let content = field.bytes().await.map_err(read_error)?;

            debug!(
                filename = ?filename,
                content_type = ?content_type,
                size = content.len(),
                "Received upload"
            );

            return Ok(UploadedFile::new(Some(filename), content_type, content));
        }

        Err(Error::InvalidForm {
            message: format!("Missing required field: '{FILE_FIELD}'"),
        })
    }
}

fn read_error(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge { message: e.body_text() }
    } else {
        Error::BadRequest {
            message: format!("Failed to parse multipart data: {}", e.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::post};
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };
    use serde_json::{Value, json};

    async fn describe(file: UploadedFile) -> Json<Value> {
        Json(json!({
            "filename": file.filename,
            "content_type": file.declared_content_type,
            "size": file.declared_size,
        }))
    }

    fn server() -> TestServer {
        TestServer::new(Router::new().route("/describe", post(describe))).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_extracts_file_part() {
        let part = Part::bytes(vec![b'0'; 1024]).file_name("dummy.txt").mime_type("text/plain");
        let response = server()
            .post("/describe")
            .multipart(MultipartForm::new().add_text("purpose", "ignored").add_part("file", part))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "filename": "dummy.txt",
            "content_type": "text/plain",
            "size": 1024,
        }));
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let response = server()
            .post("/describe")
            .multipart(MultipartForm::new().add_text("other", "value"))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        response.assert_json(&json!({ "detail": "Missing required field: 'file'" }));
    }

    #[tokio::test]
    async fn test_non_multipart_body() {
        let response = server().post("/describe").json(&json!({ "file": "inline" })).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert!(body["detail"].as_str().unwrap().starts_with("Expected a multipart/form-data body"));
    }

    #[tokio::test]
    async fn test_file_without_filename_is_not_a_file() {
        let part = Part::bytes(b"hello".as_slice()).mime_type("text/plain");
        let response = server().post("/describe").multipart(MultipartForm::new().add_part("file", part)).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        response.assert_json(&json!({
            "detail": "Expected an uploaded file in field 'file', got a plain form value"
        }));

        let response = server()
            .post("/describe")
            .multipart(MultipartForm::new().add_text("file", "inline text"))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
