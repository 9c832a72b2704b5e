//! Extraction options and configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Options for extracting lines from a document.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Which parts of a Word document contribute lines
    pub scope: Scope,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

/// Structural parts of a Word document to read.
///
/// Only `.docx` sources honour this; other formats have no structure to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Paragraphs followed by table rows
    #[default]
    All,
    /// Paragraphs only
    Paragraphs,
    /// Table rows only
    Tables,
}

impl Scope {
    /// Whether paragraphs are extracted.
    pub fn includes_paragraphs(self) -> bool {
        matches!(self, Scope::All | Scope::Paragraphs)
    }

    /// Whether table rows are extracted.
    pub fn includes_tables(self) -> bool {
        matches!(self, Scope::All | Scope::Tables)
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Scope::All),
            "paragraphs" => Ok(Scope::Paragraphs),
            "tables" => Ok(Scope::Tables),
            other => Err(format!(
                "invalid scope '{}': expected all, paragraphs, or tables",
                other
            )),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Scope::All => "all",
            Scope::Paragraphs => "paragraphs",
            Scope::Tables => "tables",
        })
    }
}
