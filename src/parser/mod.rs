//! Line extraction, one extractor per format family.

mod docx;
mod options;
mod spreadsheet;
mod text;

pub use docx::DocxExtractor;
pub use options::{ExtractOptions, Scope};
pub use spreadsheet::SpreadsheetExtractor;
pub use text::{LegacyDocExtractor, TextExtractor};

use std::path::Path;

use crate::detect::{Format, FormatKind};
use crate::error::Result;
use crate::model::Document;

/// Reads a file of one format family into a [`Document`].
pub trait Extractor: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &str;

    /// Extract lines from the file at `path`, which is known to be `format`.
    fn extract(&self, path: &Path, format: Format, options: &ExtractOptions) -> Result<Document>;
}

static TEXT: TextExtractor = TextExtractor;
static LEGACY_DOC: LegacyDocExtractor = LegacyDocExtractor;
static DOCX: DocxExtractor = DocxExtractor;
static SPREADSHEET: SpreadsheetExtractor = SpreadsheetExtractor;

impl FormatKind {
    /// The extractor responsible for this family.
    pub fn extractor(self) -> &'static dyn Extractor {
        match self {
            FormatKind::Text => &TEXT,
            FormatKind::LegacyDoc => &LEGACY_DOC,
            FormatKind::ModernDoc => &DOCX,
            FormatKind::Spreadsheet => &SPREADSHEET,
        }
    }
}

/// Extract lines from `path` as `format`.
///
/// The original (pre-dedup) count is [`Document::len`].
pub fn extract<P: AsRef<Path>>(
    path: P,
    format: Format,
    options: &ExtractOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let extractor = format.kind().extractor();
    log::debug!(
        "extracting {} with {} extractor (scope: {})",
        path.display(),
        extractor.name(),
        options.scope
    );
    let doc = extractor.extract(path, format, options)?;
    log::debug!("extracted {} lines from {}", doc.len(), path.display());
    Ok(doc)
}
