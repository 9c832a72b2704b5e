//! Line classification helpers.

/// Separator between cell values in a tabular line.
pub const CELL_SEPARATOR: char = '\t';

const MARKER_PREFIX: &str = "--- Sheet: ";
const MARKER_SUFFIX: &str = " ---";

/// What a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Free text (paragraph or physical line)
    Text,
    /// Tab-joined table or spreadsheet row
    Row,
    /// Synthetic separator emitted between workbook sheets
    SheetMarker,
}

impl LineKind {
    /// Classify a line.
    pub fn of(line: &str) -> Self {
        if is_sheet_marker(line) {
            LineKind::SheetMarker
        } else if line.trim().contains(CELL_SEPARATOR) {
            LineKind::Row
        } else {
            LineKind::Text
        }
    }
}

/// Build the marker line that precedes a sheet's rows.
pub fn sheet_marker(name: &str) -> String {
    format!("\n{}{}{}", MARKER_PREFIX, name, MARKER_SUFFIX)
}

/// Check whether a line is a sheet marker.
pub fn is_sheet_marker(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(MARKER_PREFIX) && trimmed.ends_with(MARKER_SUFFIX)
}

/// Split a tabular line back into cell values.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split(CELL_SEPARATOR).map(str::to_string).collect()
}
