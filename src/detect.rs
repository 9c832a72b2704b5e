//! File format detection from extensions and magic bytes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported file formats, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// UTF-8 plain text
    Txt,
    /// Legacy Word document (read as lossy text)
    Doc,
    /// Office Open XML Word document
    Docx,
    /// Legacy Excel workbook
    Xls,
    /// Office Open XML Excel workbook
    Xlsx,
}

/// Format families that share an extractor/serializer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Plain text
    Text,
    /// Legacy document treated as text
    LegacyDoc,
    /// Zip + WordprocessingML document
    ModernDoc,
    /// Spreadsheet workbook
    Spreadsheet,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Format; 5] = [
        Format::Txt,
        Format::Doc,
        Format::Docx,
        Format::Xls,
        Format::Xlsx,
    ];

    /// Parse an extension (with or without the leading dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Format::Txt),
            "doc" => Some(Format::Doc),
            "docx" => Some(Format::Docx),
            "xls" => Some(Format::Xls),
            "xlsx" => Some(Format::Xlsx),
            _ => None,
        }
    }

    /// Lowercase extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Txt => "txt",
            Format::Doc => "doc",
            Format::Docx => "docx",
            Format::Xls => "xls",
            Format::Xlsx => "xlsx",
        }
    }

    /// The family this format belongs to.
    pub fn kind(self) -> FormatKind {
        match self {
            Format::Txt => FormatKind::Text,
            Format::Doc => FormatKind::LegacyDoc,
            Format::Docx => FormatKind::ModernDoc,
            Format::Xls | Format::Xlsx => FormatKind::Spreadsheet,
        }
    }

    /// Whether this is a spreadsheet format.
    pub fn is_spreadsheet(self) -> bool {
        self.kind() == FormatKind::Spreadsheet
    }

    /// Preferred output format for a source of this format.
    pub fn default_target(self) -> Format {
        match self.kind() {
            FormatKind::LegacyDoc | FormatKind::ModernDoc => Format::Docx,
            FormatKind::Spreadsheet => Format::Xlsx,
            FormatKind::Text => Format::Txt,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

/// Detect the format of a path from its extension.
///
/// # Returns
/// * `Err(Error::UnsupportedFormat)` if the extension is missing or unknown
///
/// # Example
/// ```
/// use undup::detect::{detect_format_from_path, Format};
///
/// assert_eq!(detect_format_from_path("Report.DOCX").unwrap(), Format::Docx);
/// assert!(detect_format_from_path("report.pdf").is_err());
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
    let path = path.as_ref();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    Format::from_extension(ext).ok_or_else(|| {
        Error::UnsupportedFormat(if ext.is_empty() {
            "unknown".to_string()
        } else {
            ext.to_ascii_lowercase()
        })
    })
}

/// Physical container of a file, as identified by its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Zip archive (docx, xlsx)
    Zip,
    /// OLE2 compound file (doc, xls)
    Ole,
    /// Anything else; assumed to be text
    Plain,
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Identify the container from the first bytes of a file.
pub fn sniff_container_from_bytes(data: &[u8]) -> Container {
    if data.starts_with(ZIP_MAGIC) {
        Container::Zip
    } else if data.starts_with(OLE_MAGIC) {
        Container::Ole
    } else {
        Container::Plain
    }
}

/// Identify the container of a file on disk.
pub fn sniff_container<P: AsRef<Path>>(path: P) -> Result<Container> {
    let mut header = Vec::with_capacity(OLE_MAGIC.len());
    File::open(path)?
        .take(OLE_MAGIC.len() as u64)
        .read_to_end(&mut header)?;
    Ok(sniff_container_from_bytes(&header))
}

impl Format {
    /// Container a well-formed file of this format is expected to use.
    pub fn expected_container(self) -> Container {
        match self {
            Format::Txt => Container::Plain,
            Format::Doc | Format::Xls => Container::Ole,
            Format::Docx | Format::Xlsx => Container::Zip,
        }
    }
}
