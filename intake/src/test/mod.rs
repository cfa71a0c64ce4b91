//! End-to-end tests through the fully assembled application.

use crate::test_utils::{create_test_application, create_test_config, dummy_text_part, image_part, sample_csv, sample_spreadsheet};
use crate::validation::MAX_TEXT_FILE_SIZE;
use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::json;

fn server() -> TestServer {
    create_test_application(create_test_config())
}

fn form(part: Part) -> MultipartForm {
    MultipartForm::new().add_part("file", part)
}

#[test_log::test(tokio::test)]
async fn test_upload_scenarios() {
    let server = server();

    // 1024-byte dummy.txt
    let response = server.post("/upload-file").multipart(form(dummy_text_part(1024, "dummy.txt"))).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "File uploaded successfully." }));

    // 8192-byte file
    let response = server.post("/upload-file").multipart(form(dummy_text_part(8192, "dummy.txt"))).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "detail": "File too large." }));

    // 2048-byte dummy.jpg
    let response = server.post("/upload-file").multipart(form(dummy_text_part(2048, "dummy.jpg"))).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "detail": "File type not supported." }));

    // image declared as image/gif
    let response = server.post("/upload-image").multipart(form(image_part("image/gif"))).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    response.assert_json(&json!({ "detail": "File type not supported." }));
}

#[test_log::test(tokio::test)]
async fn test_tabular_uploads() {
    let server = server();

    let csv = Part::bytes(sample_csv()).file_name("sample.csv").mime_type("text/csv");
    server.post("/upload-csv").multipart(form(csv)).await.assert_status_ok();

    let workbook = Part::bytes(sample_spreadsheet())
        .file_name("sample.xlsx")
        .mime_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
    server.post("/upload-excel").multipart(form(workbook)).await.assert_status_ok();

    let broken = Part::bytes(b"\x00\x01 not a workbook".as_slice()).file_name("broken.xlsx");
    server
        .post("/upload-excel")
        .multipart(form(broken))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_text_size_boundary() {
    let server = server();
    let limit = MAX_TEXT_FILE_SIZE as usize;

    for (size, expected) in [(0, StatusCode::OK), (limit, StatusCode::OK), (limit + 1, StatusCode::NOT_FOUND)] {
        let response = server.post("/upload-file").multipart(form(dummy_text_part(size, "notes.txt"))).await;
        response.assert_status(expected);
    }
}

#[test_log::test(tokio::test)]
async fn test_oversized_text_rejected_regardless_of_name() {
    let server = server();

    for name in ["notes.txt", "notes.TXT", "photo.png", "archive"] {
        let response = server.post("/upload-file").multipart(form(dummy_text_part(5000, name))).await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "detail": "File too large." }));
    }
}

#[test_log::test(tokio::test)]
async fn test_image_type_ignores_content() {
    let server = server();

    // PNG signature declared as jpeg, and text declared as png: both judged by the declaration
    let mislabeled = image_part("image/png").mime_type("image/jpeg");
    server.post("/upload-image").multipart(form(mislabeled)).await.assert_status_ok();

    let text_as_png = Part::bytes(b"plain text".as_slice()).file_name("dummy.png").mime_type("image/png");
    server.post("/upload-image").multipart(form(text_as_png)).await.assert_status_ok();

    for content_type in ["image/webp", "image/svg+xml", "application/pdf"] {
        let part = Part::bytes(b"ignored".as_slice()).file_name("dummy.img").mime_type(content_type);
        server
            .post("/upload-image")
            .multipart(form(part))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[test_log::test(tokio::test)]
async fn test_requests_are_independent() {
    let server = server();

    // A rejection does not influence the next request on the same server
    server
        .post("/upload-file")
        .multipart(form(dummy_text_part(8192, "dummy.txt")))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post("/upload-file")
        .multipart(form(dummy_text_part(16, "dummy.txt")))
        .await
        .assert_status_ok();
}
