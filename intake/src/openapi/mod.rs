//! OpenAPI documentation for the upload API.
//!
//! The document is served as JSON at `/openapi.json` and rendered with Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api;
use crate::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        description = "Accepts uploaded files and validates them per endpoint before acknowledging success."
    ),
    paths(
        api::handlers::uploads::upload_csv,
        api::handlers::uploads::upload_excel,
        api::handlers::uploads::upload_text_file,
        api::handlers::uploads::upload_image,
    ),
    components(
        schemas(
            api::models::uploads::UploadResponse,
            api::models::uploads::UploadForm,
            ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Single-file uploads sent as `multipart/form-data` with the file in a field named `file`.

| Endpoint | Accepts |
|---|---|
| `/upload-csv` | any well-formed CSV |
| `/upload-excel` | any readable workbook |
| `/upload-file` | `.txt` files up to 4096 bytes |
| `/upload-image` | declared type png, jpg or jpeg |"),
    )
)]
pub struct ApiDoc;
