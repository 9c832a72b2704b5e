//! Plain text output for text and Word targets.

use std::io::Write;
use std::path::Path;

use super::{write_atomically, Serializer};
use crate::detect::Format;
use crate::error::Result;
use crate::model::is_sheet_marker;

/// Writes each line followed by a newline, skipping sheet markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSerializer;

impl Serializer for TextSerializer {
    fn name(&self) -> &str {
        "text"
    }

    fn write(&self, lines: &[String], path: &Path, _format: Format) -> Result<()> {
        write_atomically(path, |out| {
            for line in lines.iter().filter(|l| !is_sheet_marker(l)) {
                out.write_all(line.as_bytes())?;
                out.write_all(b"\n")?;
            }
            Ok(())
        })
    }
}

/// Render lines as the text a [`TextSerializer`] would write.
pub fn to_text(lines: &[String]) -> String {
    let mut output = String::new();
    for line in lines.iter().filter(|l| !is_sheet_marker(l)) {
        output.push_str(line);
        output.push('\n');
    }
    output
}
