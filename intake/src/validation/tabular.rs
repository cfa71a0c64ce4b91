//! Parsing of tabular uploads into an in-memory [`Table`].
//!
//! Both parsers treat the first row as the header. A parse either consumes the whole input
//! or fails with [`UploadError::MalformedInput`]; there is no partial result.

use super::errors::UploadError;
use crate::types::TabularFormat;
use calamine::{Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Rows and named columns parsed from an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse `content` according to `format`.
pub fn parse(content: &[u8], format: TabularFormat) -> Result<Table, UploadError> {
    match format {
        TabularFormat::Csv => parse_csv(content),
        TabularFormat::Spreadsheet => parse_spreadsheet(content),
    }
}

/// Parse comma separated text.
///
/// Rows shorter than the header are kept as-is. When the first data row has exactly one field
/// more than the header, the leading column is taken as an unnamed row index and that width
/// applies to every row; anything wider is rejected. Blank lines are skipped by the reader.
pub fn parse_csv(content: &[u8]) -> Result<Table, UploadError> {
    let malformed = |reason: String| UploadError::malformed(TabularFormat::Csv, reason);

    // The reader closes an open quoted field at EOF without complaint
    if let Some(line) = unterminated_quote_line(content) {
        return Err(malformed(format!("EOF inside string starting at line {line}")));
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(content);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        return Err(malformed("No columns to parse from file".to_string()));
    }

    let mut width = columns.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(e.to_string()))?;

        if rows.is_empty() && record.len() == columns.len() + 1 {
            width = record.len();
        }

        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(malformed(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            )));
        }

        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { columns, rows })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Line (1-based) of the opening quote of a quoted field left open at end of input.
///
/// Follows the reader's dialect: a quote only opens a field at its very start, and `""` inside
/// a quoted field is an escaped quote.
fn unterminated_quote_line(content: &[u8]) -> Option<u64> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut opened_at = 1;

    for &byte in content {
        let is_boundary = matches!(byte, b',' | b'\n' | b'\r');
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (_, _) if is_boundary => QuoteState::FieldStart,
            (_, _) => QuoteState::Unquoted,
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    (state == QuoteState::Quoted).then_some(opened_at)
}

/// Parse the first worksheet of a workbook.
///
/// The container (xlsx, xlsb, xls, ods) is detected from the bytes rather than trusted from
/// the filename. An empty first sheet yields an empty table.
pub fn parse_spreadsheet(content: &[u8]) -> Result<Table, UploadError> {
    let malformed = |reason: String| UploadError::malformed(TabularFormat::Spreadsheet, reason);

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content)).map_err(|e| malformed(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| malformed("Workbook contains no worksheets".to_string()))?
        .map_err(|e| malformed(e.to_string()))?;

    let mut rows = range.rows().map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
    let columns = rows.next().unwrap_or_default();

    Ok(Table {
        columns,
        rows: rows.collect(),
    })
}
