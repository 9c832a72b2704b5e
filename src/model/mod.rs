//! Document model types for line-oriented content.
//!
//! Every supported format is reduced to an ordered sequence of lines. Free
//! text lines carry paragraph or physical-line text; tabular lines carry cell
//! values joined by a tab; sheet markers separate workbook sheets.

mod document;
mod line;
mod table;

pub use document::Document;
pub use line::{is_sheet_marker, sheet_marker, split_cells, LineKind, CELL_SEPARATOR};
pub use table::Table;
