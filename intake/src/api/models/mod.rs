//! API response data models. All models are annotated with `utoipa` for the generated docs.

pub mod uploads;
