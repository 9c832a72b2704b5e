//! Workbook output via rust_xlsxwriter.

use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format as CellFormat, Workbook, XlsxError};

use super::{write_atomically, Serializer};
use crate::detect::Format;
use crate::error::{Error, Result};
use crate::model::Table;

/// Rebuilds a single flat table from the lines and writes it as a workbook.
///
/// Multi-sheet sources are flattened: sheet markers are dropped and only the
/// first header is used. `.xls` targets receive an OOXML workbook, since no
/// BIFF writer is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetSerializer;

impl Serializer for SpreadsheetSerializer {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn write(&self, lines: &[String], path: &Path, format: Format) -> Result<()> {
        if format == Format::Xls {
            log::warn!(
                "legacy .xls output is best-effort: {} will contain an OOXML workbook",
                path.display()
            );
        }

        let table = Table::from_lines(lines);
        if table.is_empty() {
            log::debug!("no header or no data rows; writing an empty worksheet");
        }
        let bytes = workbook_bytes(&table).map_err(|e| Error::write(path, e))?;
        write_atomically(path, |out| out.write_all(&bytes))
    }
}

/// Build an in-memory workbook holding `table` on its first sheet.
pub fn workbook_bytes(table: &Table) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = CellFormat::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.header.iter().enumerate() {
        sheet.write_string_with_format(0, column(col)?, name, &header_format)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(r + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(row_num, column(col)?, value)?;
        }
    }

    workbook.save_to_buffer()
}

fn column(index: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}
