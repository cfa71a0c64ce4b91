//! HTTP request handlers.
//!
//! - [`uploads`]: the four file upload endpoints
//!
//! Handlers return [`crate::errors::Error`], which renders as `{"detail": ...}` with the
//! appropriate status code.

pub mod uploads;
