//! Fixtures shared by the unit and HTTP tests.

use crate::config::Config;
use crate::types::UploadedFile;
use crate::{Application, build_router};
use axum_test::TestServer;
use axum_test::multipart::Part;
use bytes::Bytes;
use rust_xlsxwriter::Workbook;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = b"\xff\xd8\xff\xe0";
const GIF_SIGNATURE: &[u8] = b"GIF89a";

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    }
}

/// Test server over the full router built from [`create_test_config`]
pub fn create_test_server() -> TestServer {
    let router = build_router(&create_test_config()).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

/// Same as [`create_test_server`] but going through [`Application`]
pub fn create_test_application(config: Config) -> TestServer {
    Application::new(config).expect("Failed to create application").into_test_server()
}

/// Two columns, three rows: `column1` = 1..=3, `column2` = 4..=6
pub fn sample_csv() -> Bytes {
    Bytes::from_static(b"column1,column2\n1,4\n2,5\n3,6\n")
}

/// The same table as [`sample_csv`], as an xlsx workbook
pub fn sample_spreadsheet() -> Bytes {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "column1").unwrap();
    worksheet.write_string(0, 1, "column2").unwrap();
    for (row, (a, b)) in [(1.0, 4.0), (2.0, 5.0), (3.0, 6.0)].into_iter().enumerate() {
        let row = row as u32 + 1;
        worksheet.write_number(row, 0, a).unwrap();
        worksheet.write_number(row, 1, b).unwrap();
    }

    Bytes::from(workbook.save_to_buffer().expect("Failed to write workbook"))
}

/// A file of `size` zero characters with the given name
pub fn dummy_file(size: usize, filename: &str) -> UploadedFile {
    UploadedFile::new(
        Some(filename.to_string()),
        Some("text/plain".to_string()),
        Bytes::from(vec![b'0'; size]),
    )
}

/// A small file whose leading bytes match the declared image type where it is known
pub fn image_file(content_type: &str) -> UploadedFile {
    let extension = content_type.rsplit('/').next().unwrap_or("bin").to_lowercase();
    UploadedFile::new(
        Some(format!("dummy.{extension}")),
        Some(content_type.to_string()),
        image_bytes(content_type),
    )
}

fn image_bytes(content_type: &str) -> Bytes {
    let signature: &[u8] = match content_type {
        "image/png" => PNG_SIGNATURE,
        "image/jpeg" | "image/jpg" => JPEG_SIGNATURE,
        "image/gif" => GIF_SIGNATURE,
        _ => b"",
    };
    let mut content = signature.to_vec();
    content.resize(256, 0);
    Bytes::from(content)
}

/// Multipart part for [`dummy_file`]
pub fn dummy_text_part(size: usize, filename: &str) -> Part {
    let file = dummy_file(size, filename);
    Part::bytes(file.content).file_name(filename).mime_type("text/plain")
}

/// Multipart part for [`image_file`]
pub fn image_part(content_type: &str) -> Part {
    let file = image_file(content_type);
    let filename = file.filename.unwrap_or_default();
    Part::bytes(file.content).file_name(filename).mime_type(content_type)
}
