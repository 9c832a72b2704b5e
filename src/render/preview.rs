//! Truncated, numbered preview of deduplicated lines.

use std::fmt;

use crate::model::{is_sheet_marker, LineKind, CELL_SEPARATOR};

/// Limits applied when building a [`Preview`].
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Maximum number of lines shown
    pub max_lines: usize,

    /// Free text longer than this many characters is cut
    pub max_text_width: usize,

    /// Cells longer than this many characters are cut
    pub max_cell_width: usize,

    /// Whether sheet markers are listed
    pub show_markers: bool,
}

impl PreviewOptions {
    /// Create new preview options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of lines shown.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the free text width.
    pub fn with_max_text_width(mut self, width: usize) -> Self {
        self.max_text_width = width;
        self
    }

    /// Set whether sheet markers are listed.
    pub fn with_markers(mut self, show: bool) -> Self {
        self.show_markers = show;
        self
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_lines: 15,
            max_text_width: 80,
            max_cell_width: 15,
            show_markers: true,
        }
    }
}

/// One displayed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    /// 1-based position among displayed lines
    pub number: usize,
    /// What the source line was
    pub kind: LineKind,
    /// Truncated display text
    pub text: String,
}

/// The first few lines of a result, cut to terminal-friendly widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Lines to display
    pub lines: Vec<PreviewLine>,
    /// Lines not shown
    pub remaining: usize,
}

impl Preview {
    /// Build a preview of `lines`.
    pub fn new(lines: &[String], options: &PreviewOptions) -> Self {
        let visible: Vec<&String> = lines
            .iter()
            .filter(|l| options.show_markers || !is_sheet_marker(l))
            .collect();

        let shown = visible
            .iter()
            .take(options.max_lines)
            .enumerate()
            .map(|(i, line)| {
                let kind = LineKind::of(line);
                let text = match kind {
                    LineKind::SheetMarker => line.trim().to_string(),
                    LineKind::Row => line
                        .split(CELL_SEPARATOR)
                        .map(|cell| ellipsize(cell, options.max_cell_width))
                        .collect::<Vec<_>>()
                        .join(" | "),
                    LineKind::Text => ellipsize(line, options.max_text_width),
                };
                PreviewLine {
                    number: i + 1,
                    kind,
                    text,
                }
            })
            .collect::<Vec<_>>();

        Self {
            remaining: visible.len() - shown.len(),
            lines: shown,
        }
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{:>2}. {}", line.number, line.text)?;
        }
        if self.remaining > 0 {
            writeln!(f, "\n... and {} more lines", self.remaining)?;
        }
        Ok(())
    }
}

/// Cut `text` to `width` characters, ending in `...` when anything was removed.
fn ellipsize(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
