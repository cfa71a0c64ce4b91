//! API layer for HTTP request handling and data models.
//!
//! - **[`extract`]**: Turns a multipart request body into an [`crate::types::UploadedFile`]
//! - **[`handlers`]**: Axum route handlers for the upload endpoints
//! - **[`models`]**: Response bodies
//!
//! All endpoints are documented with `utoipa` annotations; the generated document is served at
//! `/openapi.json` and rendered at `/docs`.

pub mod extract;
pub mod handlers;
pub mod models;
