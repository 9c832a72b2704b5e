//! Serializers for writing deduplicated lines, plus the terminal preview.

mod preview;
mod spreadsheet;
mod text;

pub use preview::{Preview, PreviewLine, PreviewOptions};
pub use spreadsheet::SpreadsheetSerializer;
pub use text::{to_text, TextSerializer};

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::detect::{Format, FormatKind};
use crate::error::{Error, Result};

/// Writes lines to a file of one format family.
pub trait Serializer: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &str;

    /// Write `lines` to `path` as `format`. Sheet markers are never written.
    fn write(&self, lines: &[String], path: &Path, format: Format) -> Result<()>;
}

static TEXT: TextSerializer = TextSerializer;
static SPREADSHEET: SpreadsheetSerializer = SpreadsheetSerializer;

impl FormatKind {
    /// The serializer responsible for this family.
    ///
    /// Word targets are written as plain text.
    pub fn serializer(self) -> &'static dyn Serializer {
        match self {
            FormatKind::Spreadsheet => &SPREADSHEET,
            FormatKind::Text | FormatKind::LegacyDoc | FormatKind::ModernDoc => &TEXT,
        }
    }
}

/// Write deduplicated `lines`, originally read as `source`, to `path` as `target`.
pub fn serialize<P: AsRef<Path>>(
    lines: &[String],
    source: Format,
    path: P,
    target: Format,
) -> Result<()> {
    let path = path.as_ref();
    let serializer = target.kind().serializer();

    match target.kind() {
        FormatKind::LegacyDoc | FormatKind::ModernDoc => log::warn!(
            "{} output is written as plain UTF-8 text; document formatting is not regenerated",
            target
        ),
        FormatKind::Spreadsheet if source.kind() != FormatKind::Spreadsheet => log::debug!(
            "building a table from {} lines; the first line becomes the header",
            source
        ),
        _ => {}
    }

    log::debug!(
        "writing {} lines to {} with {} serializer",
        lines.len(),
        path.display(),
        serializer.name()
    );
    serializer.write(lines, path, target)
}

/// Write a file by filling a temporary sibling and renaming it over `path`.
///
/// Nothing is left at `path` if `fill` fails. An existing target keeps its
/// permissions.
pub(crate) fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".undup-");
    // same mode a plain create would give (0666 minus umask)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir).map_err(|e| Error::write(path, e))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::write(path, e))?;
    }

    let mut writer = BufWriter::new(tmp);
    fill(&mut writer).map_err(|e| Error::write(path, e))?;
    let tmp = writer
        .into_inner()
        .map_err(|e| Error::write(path, e.error()))?;
    tmp.persist(path).map_err(|e| Error::write(path, e.error))?;
    Ok(())
}
