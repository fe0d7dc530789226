use serde::Serialize;
use termcolor::{Color, WriteColor};
use tracing::warn;

use crate::examples::{EXAMPLES, print_examples};
use crate::literal::{EscapeWarning, LiteralError, LiteralKind};
use crate::pattern::{MatchList, MatchTuple, PATTERNS, PatternError};
use crate::{cwrite, cwriteln};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    Json,
    Toml,
    Yaml,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("example #{index}: {source}")]
    Example { index: usize, source: LiteralError },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize TOML: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything one run of the demonstration produces.
///
/// Field order matters for TOML, which wants plain values ahead of tables.
#[derive(Debug, Serialize)]
pub struct Report {
    pub search: String,
    pub examples: Vec<ExampleEntry>,
    pub patterns: Vec<PatternEntry>,
}

#[derive(Debug, Serialize)]
pub struct ExampleEntry {
    pub index: usize,
    pub kind: LiteralKind,
    pub source: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    pub warnings: Vec<EscapeWarning>,
}

#[derive(Debug, Serialize)]
pub struct PatternEntry {
    pub number: usize,
    pub kind: LiteralKind,
    pub source: &'static str,
    pub pattern: String,
    pub matches: Vec<MatchTuple>,
    pub warnings: Vec<EscapeWarning>,
}

impl Report {
    pub fn build(search: &str) -> Result<Self, ReportError> {
        let mut examples = Vec::with_capacity(EXAMPLES.len());
        for (index, example) in EXAMPLES.iter().enumerate() {
            let processed = example
                .literal
                .value()
                .map_err(|source| ReportError::Example { index, source })?;
            for warning in &processed.warnings {
                warn!("example #{index}: {warning}");
            }
            examples.push(ExampleEntry {
                index,
                kind: example.literal.kind,
                source: example.literal.source,
                value: processed.value,
                note: example.note,
                warnings: processed.warnings,
            });
        }

        let mut patterns = Vec::with_capacity(PATTERNS.len());
        for source in PATTERNS {
            let compiled = source.compile()?;
            for warning in &compiled.warnings {
                warn!("regex #{}: {warning}", compiled.number);
            }
            let matches = compiled.find_all(search)?;
            patterns.push(PatternEntry {
                number: compiled.number,
                kind: compiled.literal.kind,
                source: compiled.literal.source,
                pattern: compiled.pattern,
                matches,
                warnings: compiled.warnings,
            });
        }

        Ok(Self {
            search: search.to_owned(),
            examples,
            patterns,
        })
    }

    /// Write the demonstration as text. `quiet` skips the example section.
    pub fn render<W: WriteColor + ?Sized>(&self, out: &mut W, quiet: bool) {
        if !quiet {
            print_examples(&mut *out, self.examples.iter().map(|example| &example.value));
        }

        cwrite!(out, fg = Color::Cyan, "string_to_search:");
        cwriteln!(out, " {}", self.search);
        cwriteln!(out);

        for pattern in &self.patterns {
            cwrite!(out, fg = Color::Cyan, "example regex #{}:", pattern.number);
            cwrite!(out, " Regex({:?}) -> ", pattern.pattern);
            let color = if pattern.matches.is_empty() {
                Color::Yellow
            } else {
                Color::Green
            };
            cwriteln!(out, fg = color, "{}", MatchList(&pattern.matches));
            cwriteln!(out);
        }
    }

    pub fn dump(&self, format: DumpFormat) -> Result<String, ReportError> {
        Ok(match format {
            DumpFormat::Json => serde_json::to_string_pretty(self)?,
            DumpFormat::Toml => toml::to_string(self)?,
            DumpFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}
