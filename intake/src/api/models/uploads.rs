use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgment returned by every upload endpoint on success
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "File uploaded successfully.")]
    pub message: String,
}

impl UploadResponse {
    pub fn accepted() -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Multipart form accepted by the upload endpoints (documentation only)
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// The file to upload
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_body() {
        let body = serde_json::to_value(UploadResponse::accepted()).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "File uploaded successfully." }));
    }
}
