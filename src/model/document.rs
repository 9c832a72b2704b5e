//! Document-level types.

use super::{LineKind, CELL_SEPARATOR};
use crate::detect::Format;

/// Ordered lines extracted from one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Format the lines were read from
    pub source: Format,

    /// Lines in document order
    pub lines: Vec<String>,

    /// Warnings raised while extracting (lossy conversions and the like)
    pub warnings: Vec<String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(source: Format) -> Self {
        Self {
            source,
            lines: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a document from existing lines.
    pub fn with_lines(source: Format, lines: Vec<String>) -> Self {
        Self {
            source,
            lines,
            warnings: Vec::new(),
        }
    }

    /// Append a line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a row of cells as a tabular line.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = String::new();
        for (i, cell) in cells.into_iter().enumerate() {
            if i > 0 {
                line.push(CELL_SEPARATOR);
            }
            line.push_str(cell.as_ref());
        }
        self.lines.push(line);
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Number of lines, sheet markers included.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Count lines of the given kind.
    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| LineKind::of(l) == kind).count()
    }

    /// Consume the document, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
