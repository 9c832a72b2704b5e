//! `.docx` extraction: paragraphs and table rows from `word/document.xml`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{ExtractOptions, Extractor, Scope};
use crate::detect::Format;
use crate::error::{Error, Result};
use crate::model::{Document, CELL_SEPARATOR};

/// Archive member holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML main namespace.
pub const WML_NAMESPACE: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Reads paragraphs and table rows from an Office Open XML word document.
///
/// The body part is unpacked into a temporary directory that is removed when
/// extraction finishes, whether or not parsing succeeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl Extractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx"
    }

    fn extract(&self, path: &Path, format: Format, options: &ExtractOptions) -> Result<Document> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::parse(format, e),
        })?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| Error::parse(format, format!("not a valid archive: {}", e)))?;

        let workdir = tempfile::Builder::new()
            .prefix("undup-docx-")
            .tempdir()
            .map_err(|e| Error::parse(format, format!("cannot create temp dir: {}", e)))?;
        let body_path = workdir.path().join("document.xml");

        match archive.by_name(DOCUMENT_PART) {
            Ok(mut entry) => {
                let mut out = File::create(&body_path).map_err(|e| Error::parse(format, e))?;
                io::copy(&mut entry, &mut out)
                    .map_err(|e| Error::parse(format, format!("cannot unpack {}: {}", DOCUMENT_PART, e)))?;
            }
            Err(ZipError::FileNotFound) => {
                log::warn!("{} has no {}; treating as empty", path.display(), DOCUMENT_PART);
                return Ok(Document::new(format));
            }
            Err(e) => return Err(Error::parse(format, e)),
        }

        let body = File::open(&body_path).map_err(|e| Error::parse(format, e))?;
        let lines = parse_body(BufReader::new(body), options.scope)
            .map_err(|e| Error::parse(format, format!("malformed {}: {}", DOCUMENT_PART, e)))?;

        drop(workdir);
        Ok(Document::with_lines(format, lines))
    }
}

/// Parse a WordprocessingML body and return lines for the given scope.
///
/// Paragraph lines come first, then table-row lines, each in document order.
pub fn parse_body<R: io::BufRead>(source: R, scope: Scope) -> quick_xml::Result<Vec<String>> {
    let mut reader = NsReader::from_reader(source);
    let mut collector = BodyCollector::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (ns, Event::Start(e)) => {
                if is_wml(&ns) {
                    collector.open(e.local_name().as_ref());
                }
            }
            (ns, Event::Empty(e)) => {
                if is_wml(&ns) {
                    let name = e.local_name();
                    collector.open(name.as_ref());
                    collector.close(name.as_ref());
                }
            }
            (ns, Event::End(e)) => {
                if is_wml(&ns) {
                    collector.close(e.local_name().as_ref());
                }
            }
            (_, Event::Text(t)) => {
                if collector.in_text() {
                    collector.text(&t.unescape()?);
                }
            }
            (_, Event::CData(t)) => {
                if collector.in_text() {
                    collector.text(&String::from_utf8_lossy(&t));
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(collector.finish(scope))
}

fn is_wml(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WML_NAMESPACE)
}

/// Streaming state for paragraphs, cells, and rows.
///
/// Paragraphs and rows reserve a slot when they open so that the output
/// follows start-tag order even when elements nest.
#[derive(Debug, Default)]
struct BodyCollector {
    paragraphs: Vec<String>,
    open_paragraphs: Vec<usize>,
    rows: Vec<String>,
    open_rows: Vec<(usize, Vec<String>)>,
    open_cells: Vec<Vec<String>>,
    text_depth: usize,
}

impl BodyCollector {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"p" => {
                self.open_paragraphs.push(self.paragraphs.len());
                self.paragraphs.push(String::new());
            }
            b"t" => self.text_depth += 1,
            b"tr" => {
                self.open_rows.push((self.rows.len(), Vec::new()));
                self.rows.push(String::new());
            }
            b"tc" => self.open_cells.push(Vec::new()),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"p" => {
                let Some(slot) = self.open_paragraphs.pop() else {
                    return;
                };
                let text = self.paragraphs[slot].trim().to_string();
                if !text.is_empty() {
                    if let Some(cell) = self.open_cells.last_mut() {
                        cell.push(text.clone());
                    }
                }
                self.paragraphs[slot] = text;
            }
            b"t" => self.text_depth = self.text_depth.saturating_sub(1),
            b"tc" => {
                let Some(cell) = self.open_cells.pop() else {
                    return;
                };
                // empty cells are skipped, so columns can shift left
                if cell.is_empty() {
                    return;
                }
                if let Some((_, cells)) = self.open_rows.last_mut() {
                    cells.push(cell.join(" "));
                }
            }
            b"tr" => {
                let Some((slot, cells)) = self.open_rows.pop() else {
                    return;
                };
                if !cells.is_empty() {
                    self.rows[slot] = cells.join(&CELL_SEPARATOR.to_string());
                }
            }
            _ => {}
        }
    }

    fn in_text(&self) -> bool {
        self.text_depth > 0
    }

    fn text(&mut self, text: &str) {
        if let Some(&slot) = self.open_paragraphs.last() {
            self.paragraphs[slot].push_str(text);
        }
    }

    fn finish(self, scope: Scope) -> Vec<String> {
        let mut lines = Vec::new();
        if scope.includes_paragraphs() {
            lines.extend(
                self.paragraphs
                    .into_iter()
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
            );
        }
        if scope.includes_tables() {
            lines.extend(self.rows.into_iter().filter(|r| !r.is_empty()));
        }
        lines
    }
}
