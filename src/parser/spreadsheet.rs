//! Workbook extraction via calamine.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};

use super::{ExtractOptions, Extractor};
use crate::detect::{sniff_container_from_bytes, Container, Format};
use crate::error::{Error, Result};
use crate::model::{sheet_marker, Document};

/// Text used for a missing data cell.
pub const MISSING_CELL: &str = "nan";

/// Reads every sheet of a workbook as a marker, a header line, and data rows.
///
/// The reader is chosen from the file's magic bytes rather than its
/// extension, so an `.xls` holding an OOXML workbook still opens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExtractor;

impl Extractor for SpreadsheetExtractor {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn extract(&self, path: &Path, format: Format, _options: &ExtractOptions) -> Result<Document> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::parse(format, e),
        })?;

        let container = sniff_container_from_bytes(&bytes);
        if container == Container::Plain {
            return Err(Error::parse(format, "not a workbook (unrecognised file signature)"));
        }
        if container != format.expected_container() {
            log::warn!(
                "{} has a .{} extension but a {:?} container",
                path.display(),
                format.extension(),
                container
            );
        }

        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| Error::parse(format, e))?;

        let mut doc = Document::new(format);
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| Error::parse(format, format!("sheet '{}': {}", name, e)))?;
            log::debug!("sheet '{}': {} rows", name, range.height());
            push_sheet(&mut doc, &name, &range);
        }
        Ok(doc)
    }
}

fn push_sheet(doc: &mut Document, name: &str, range: &Range<Data>) {
    doc.push(sheet_marker(name));

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        // blank header line for a sheet with no used range
        doc.push(String::new());
        return;
    };
    doc.push_row(header_names(header));

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        doc.push_row(row.iter().map(cell_text));
    }
}

/// Column names from the header row.
///
/// Blank names become `Unnamed: <index>` and repeated names get a `.<n>`
/// suffix so every column stays distinguishable.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {}", i),
                other => cell_text(other),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Render one cell as text.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => MISSING_CELL.to_string(),
        Data::String(s) => s.clone(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}
