//! Request validation and the extract → deduplicate → serialize sequence.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dedup::deduplicate;
use crate::detect::{detect_format_from_path, Format};
use crate::error::{Error, Result};
use crate::parser::{extract, ExtractOptions, Scope};
use crate::render::serialize;

/// Everything needed for one deduplication run.
///
/// Formats left unset are detected from the path extensions.
#[derive(Debug, Clone, Default)]
pub struct DedupRequest {
    /// File to read
    pub input: PathBuf,

    /// File to write; defaults to `input` in overwrite mode
    pub output: Option<PathBuf>,

    /// Format to read `input` as
    pub source_format: Option<Format>,

    /// Format to write `output` as
    pub target_format: Option<Format>,

    /// Word document parts to read
    pub scope: Scope,

    /// Whether replacing the input file is allowed
    pub overwrite: bool,

    /// Whether the output format may differ from the input format
    pub allow_format_change: bool,
}

impl DedupRequest {
    /// Create a request for `input` with defaults.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Read the input as `format` regardless of its extension.
    pub fn with_source_format(mut self, format: Format) -> Self {
        self.source_format = Some(format);
        self
    }

    /// Write the output as `format` regardless of its extension.
    pub fn with_target_format(mut self, format: Format) -> Self {
        self.target_format = Some(format);
        self
    }

    /// Set scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Allow or refuse replacing the input file.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Allow or refuse writing a different format than was read.
    pub fn allow_format_change(mut self, allow: bool) -> Self {
        self.allow_format_change = allow;
        self
    }

    /// Check the input side: path, existence, and format.
    pub fn validate_input(&self) -> Result<Format> {
        if self.input.as_os_str().is_empty() {
            return Err(Error::FileNotFound(self.input.clone()));
        }
        if !self.input.is_file() {
            return Err(Error::FileNotFound(self.input.clone()));
        }
        match self.source_format {
            Some(format) => Ok(format),
            None => detect_format_from_path(&self.input),
        }
    }

    /// Check the whole request and resolve paths and formats.
    pub fn validate(&self) -> Result<Plan> {
        let source = self.validate_input()?;

        let output = match (&self.output, self.overwrite) {
            (Some(output), _) => output.clone(),
            (None, true) => self.input.clone(),
            (None, false) => return Err(Error::MissingOutput),
        };
        let target = match self.target_format {
            Some(format) => format,
            None => detect_format_from_path(&output)?,
        };

        if target != source && !self.allow_format_change {
            return Err(Error::FormatMismatch {
                input: source,
                output: target,
            });
        }
        if !self.overwrite && same_file(&self.input, &output) {
            return Err(Error::OverwriteNotConfirmed(output));
        }

        if self.scope != Scope::All && source != Format::Docx {
            log::debug!("scope '{}' has no effect on {} input", self.scope, source);
        }

        Ok(Plan {
            input: self.input.clone(),
            output,
            source,
            target,
            scope: self.scope,
        })
    }
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// File to read
    pub input: PathBuf,
    /// File to write
    pub output: PathBuf,
    /// Format of `input`
    pub source: Format,
    /// Format of `output`
    pub target: Format,
    /// Word document parts to read
    pub scope: Scope,
}

/// Counts and context from a run or preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    /// File that was read
    pub input: PathBuf,
    /// File that was written (`None` for previews)
    pub output: Option<PathBuf>,
    /// Format of the input
    pub source: Format,
    /// Format of the output (`None` for previews)
    pub target: Option<Format>,
    /// Lines extracted, sheet markers included
    pub original: usize,
    /// Lines kept
    pub unique: usize,
    /// Lines dropped as duplicates
    pub removed: usize,
    /// Warnings raised during extraction
    pub warnings: Vec<String>,
}

/// A preview: the report plus the lines a run would write.
#[derive(Debug, Clone)]
pub struct PreviewResult {
    /// Counts
    pub report: DedupReport,
    /// Deduplicated lines
    pub lines: Vec<String>,
}

/// A step of a run, reported to progress callbacks as it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the input into lines
    Extract,
    /// Dropping duplicate lines
    Deduplicate,
    /// Writing the output file
    Serialize,
}

impl Stage {
    /// Number of stages in a full run.
    pub const COUNT: u64 = 3;

    /// 0-based position of this stage.
    pub fn index(self) -> u64 {
        match self {
            Stage::Extract => 0,
            Stage::Deduplicate => 1,
            Stage::Serialize => 2,
        }
    }
}

/// Validate, extract, deduplicate, and write.
///
/// Nothing is written when extraction yields no lines.
///
/// # Example
///
/// ```no_run
/// use undup::{run, DedupRequest};
///
/// let request = DedupRequest::new("names.txt").with_output("names_dedup.txt");
/// let report = run(&request)?;
/// println!("removed {} duplicates", report.removed);
/// # Ok::<(), undup::Error>(())
/// ```
pub fn run(request: &DedupRequest) -> Result<DedupReport> {
    execute(&request.validate()?, |_| {})
}

/// Carry out a validated plan, calling `on_stage` as each stage starts.
pub fn execute<F>(plan: &Plan, mut on_stage: F) -> Result<DedupReport>
where
    F: FnMut(Stage),
{
    let (mut report, lines) = extract_unique(&plan.input, plan.source, plan.scope, &mut on_stage)?;

    on_stage(Stage::Serialize);
    serialize(&lines, plan.source, &plan.output, plan.target)?;
    log::info!(
        "{} -> {}: {} lines, {} unique, {} removed",
        plan.input.display(),
        plan.output.display(),
        report.original,
        report.unique,
        report.removed
    );

    report.output = Some(plan.output.clone());
    report.target = Some(plan.target);
    Ok(report)
}

/// Validate the input side, extract, and deduplicate without writing.
pub fn preview(request: &DedupRequest) -> Result<PreviewResult> {
    let source = request.validate_input()?;
    let (report, lines) = extract_unique(&request.input, source, request.scope, &mut |_: Stage| {})?;
    Ok(PreviewResult { report, lines })
}

fn extract_unique(
    input: &Path,
    source: Format,
    scope: Scope,
    on_stage: &mut dyn FnMut(Stage),
) -> Result<(DedupReport, Vec<String>)> {
    on_stage(Stage::Extract);
    let doc = extract(input, source, &ExtractOptions::new().with_scope(scope))?;
    if doc.is_empty() {
        return Err(Error::EmptyContent);
    }

    on_stage(Stage::Deduplicate);
    let original = doc.len();
    let lines = deduplicate(&doc.lines);
    let report = DedupReport {
        input: input.to_path_buf(),
        output: None,
        source,
        target: None,
        original,
        unique: lines.len(),
        removed: original - lines.len(),
        warnings: doc.warnings,
    };
    Ok((report, lines))
}

/// Path used when no output is given: `<stem>_dedup.<ext>` beside the input,
/// with the extension picked from the input's format family.
pub fn default_output_path(input: &Path, source: Format) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{}_dedup.{}", stem, source.default_target().extension());
    input.with_file_name(name)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
