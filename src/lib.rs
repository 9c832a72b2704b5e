//! # undup
//!
//! Remove duplicate lines and rows from text, Word, and Excel documents.
//!
//! A document is read into an ordered list of lines, duplicates are dropped
//! (first occurrence wins), and the result is written back as text or as a
//! workbook.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undup::{run, DedupRequest, Scope};
//!
//! fn main() -> undup::Result<()> {
//!     let request = DedupRequest::new("contacts.docx")
//!         .with_output("contacts.txt")
//!         .with_scope(Scope::Tables)
//!         .allow_format_change(true);
//!
//!     let report = run(&request)?;
//!     println!("{} lines, {} unique, {} removed", report.original, report.unique, report.removed);
//!     Ok(())
//! }
//! ```
//!
//! ## Matching rules
//!
//! - Lines are trimmed before comparison.
//! - Free text is compared case-insensitively.
//! - Tabular lines (cells joined by a tab) are compared exactly.
//!
//! ## Formats
//!
//! | Extension | Read as | Written as |
//! |-----------|---------|------------|
//! | `txt` | UTF-8 lines | UTF-8 lines |
//! | `doc` | lossy UTF-8 lines | UTF-8 lines |
//! | `docx` | paragraphs and table rows | UTF-8 lines |
//! | `xls`, `xlsx` | every sheet, header + rows | one flattened sheet |

pub mod dedup;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use dedup::{dedup_key, deduplicate, Deduplicator};
pub use detect::{detect_format_from_path, sniff_container, Container, Format, FormatKind};
pub use error::{Error, Result};
pub use model::{Document, LineKind, Table};
pub use parser::{extract, ExtractOptions, Extractor, Scope};
pub use pipeline::{
    default_output_path, execute, preview, run, DedupReport, DedupRequest, Plan, PreviewResult, Stage,
};
pub use render::{serialize, Preview, PreviewOptions, Serializer};

use std::path::Path;

/// Extract lines from a file, detecting the format from its extension.
///
/// # Example
///
/// ```no_run
/// use undup::extract_file;
///
/// let doc = extract_file("notes.txt").unwrap();
/// println!("{} lines", doc.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    extract(path, format, &ExtractOptions::default())
}

/// Read a file and return its unique lines without writing anything.
///
/// # Example
///
/// ```no_run
/// use undup::unique_lines;
///
/// for line in unique_lines("notes.txt").unwrap() {
///     println!("{}", line);
/// }
/// ```
pub fn unique_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let doc = extract_file(path)?;
    Ok(deduplicate(&doc.lines))
}
