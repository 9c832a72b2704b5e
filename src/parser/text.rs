//! Plain text and legacy `.doc` extraction.

use std::fs;
use std::io;
use std::path::Path;

use super::{ExtractOptions, Extractor};
use crate::detect::{sniff_container_from_bytes, Container, Format};
use crate::error::{Error, Result};
use crate::model::Document;

const BOM: char = '\u{FEFF}';

/// Warning attached to every legacy document extraction.
pub const LEGACY_DOC_WARNING: &str =
    "DOC is a legacy binary format; it was read as plain text and structural fidelity is not preserved";

/// Extracts one trimmed line per physical line of a UTF-8 text file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn name(&self) -> &str {
        "text"
    }

    fn extract(&self, path: &Path, format: Format, _options: &ExtractOptions) -> Result<Document> {
        let content = fs::read_to_string(path).map_err(|e| read_error(path, format, e))?;
        Ok(Document::with_lines(format, split_lines(&content)))
    }
}

/// Treats a legacy Word file as text, silently dropping invalid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDocExtractor;

impl Extractor for LegacyDocExtractor {
    fn name(&self) -> &str {
        "doc"
    }

    fn extract(&self, path: &Path, format: Format, _options: &ExtractOptions) -> Result<Document> {
        let bytes = fs::read(path).map_err(|e| read_error(path, format, e))?;
        if sniff_container_from_bytes(&bytes) == Container::Ole {
            log::debug!("{} is an OLE compound file; text will be noisy", path.display());
        }

        let content = decode_utf8_ignoring_errors(&bytes);
        let mut doc = Document::with_lines(format, split_lines(&content));
        doc.warn(LEGACY_DOC_WARNING);
        Ok(doc)
    }
}

fn read_error(path: &Path, format: Format, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        io::ErrorKind::InvalidData => Error::parse(format, "file is not valid UTF-8"),
        _ => Error::parse(format, err),
    }
}

/// Split text into trimmed physical lines, empty lines included.
///
/// A trailing newline does not produce an extra empty line.
pub(crate) fn split_lines(content: &str) -> Vec<String> {
    content
        .strip_prefix(BOM)
        .unwrap_or(content)
        .lines()
        .map(|line| line.trim().to_string())
        .collect()
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them.
fn decode_utf8_ignoring_errors(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix decodes
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => return out,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_trims_and_keeps_empty() {
        let lines = split_lines("  Apple \n\napple\r\n\tBanana\n");
        assert_eq!(lines, vec!["Apple", "", "apple", "Banana"]);
    }

    #[test]
    fn test_split_lines_strips_bom() {
        assert_eq!(split_lines("\u{FEFF}first\nsecond"), vec!["first", "second"]);
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_decode_skips_invalid_sequences() {
        let bytes = b"ab\xFFcd\xE2\x82\n\xC3\xA9";
        assert_eq!(decode_utf8_ignoring_errors(bytes), "abcd\né");
    }

    #[test]
    fn test_decode_truncated_tail() {
        assert_eq!(decode_utf8_ignoring_errors(b"ok\xE2\x82"), "ok");
    }
}
