//! Error types for undup library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::detect::Format;

/// Result type alias for undup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while deduplicating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error outside of the read/write stages (e.g. probing a path).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file extension is not one of the supported formats.
    #[error("Unsupported file format: {0} (supported: txt, doc, docx, xls, xlsx)")]
    UnsupportedFormat(String),

    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input could not be parsed (corrupt archive, XML, or workbook).
    #[error("Failed to parse {format}: {message}")]
    ParseFailure {
        /// Format that was being read
        format: Format,
        /// Human-readable cause
        message: String,
    },

    /// Extraction succeeded but produced no lines.
    #[error("No content extracted; the file may be empty or unsupported")]
    EmptyContent,

    /// The output could not be written.
    #[error("Failed to write {}: {message}", .path.display())]
    WriteFailure {
        /// Target path
        path: PathBuf,
        /// Human-readable cause
        message: String,
    },

    /// Target format differs from the source format and the change was not allowed.
    #[error("Output format ({output}) differs from input format ({input}); formatting may be lost")]
    FormatMismatch {
        /// Input format
        input: Format,
        /// Output format
        output: Format,
    },

    /// Output would replace the input file and overwriting was not confirmed.
    #[error("Output file is the input file: {}", .0.display())]
    OverwriteNotConfirmed(PathBuf),

    /// No output path was given and overwrite mode is off.
    #[error("No output path set")]
    MissingOutput,
}

impl Error {
    /// Build a parse failure for `format` from any displayable cause.
    pub fn parse(format: Format, cause: impl std::fmt::Display) -> Self {
        Error::ParseFailure {
            format,
            message: cause.to_string(),
        }
    }

    /// Build a write failure for `path` from any displayable cause.
    pub fn write(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Error::WriteFailure {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// Whether the user can fix this by confirming and re-issuing the request.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Error::FormatMismatch { .. } | Error::OverwriteNotConfirmed(_)
        )
    }
}
