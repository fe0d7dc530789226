use std::panic::AssertUnwindSafe;

use onig::Regex;
use serde::Serialize;
use tracing::debug;

use crate::literal::{EscapeWarning, Literal, LiteralError};

pub const DEFAULT_SEARCH: &str = "Everything Works Well.............page 47";

/// The same pattern written three ways. Once processed, all three must be
/// identical.
pub const PATTERNS: &[PatternSource] = &[
    PatternSource {
        number: 1,
        literal: Literal::raw(r"\A([^.]+(?=[.]+))([.]+page )(\d+)"),
    },
    PatternSource {
        number: 2,
        literal: Literal::processed(r"\A([^.]+(?=[.]+))([.]+page )(\d+)"),
    },
    PatternSource {
        number: 3,
        literal: Literal::processed(r"\\A([^.]+(?=[.]+))([.]+page )(\\d+)"),
    },
];

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("regex #{number}: {source}")]
    Literal { number: usize, source: LiteralError },
    #[error("regex #{number}: {source}")]
    Compile { number: usize, source: onig::Error },
    #[error("regex #{number}: search failed")]
    Search { number: usize },
}

#[derive(Clone, Copy, Debug)]
pub struct PatternSource {
    pub number: usize,
    pub literal: Literal,
}

impl PatternSource {
    pub fn compile(&self) -> Result<CompiledPattern, PatternError> {
        let processed = self
            .literal
            .value()
            .map_err(|source| PatternError::Literal {
                number: self.number,
                source,
            })?;
        debug!(number = self.number, pattern = %processed.value, "compiling regex");
        let regex = Regex::new(&processed.value).map_err(|source| PatternError::Compile {
            number: self.number,
            source,
        })?;
        Ok(CompiledPattern {
            number: self.number,
            literal: self.literal,
            pattern: processed.value,
            warnings: processed.warnings,
            regex,
        })
    }
}

#[derive(derive_more::Debug)]
pub struct CompiledPattern {
    pub number: usize,
    pub literal: Literal,
    /// The processed pattern text handed to the regex engine.
    pub pattern: String,
    pub warnings: Vec<EscapeWarning>,
    #[debug(skip)]
    regex: Regex,
}

impl CompiledPattern {
    /// All non-overlapping matches, left to right.
    ///
    /// Each match yields its capture groups in order, or the whole match if
    /// the pattern has no groups. Groups that did not participate come back
    /// empty.
    pub fn find_all(&self, haystack: &str) -> Result<Vec<MatchTuple>, PatternError> {
        // Don't print panic backtraces
        let matches = std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.regex
                .captures_iter(haystack)
                .map(|captures| {
                    let groups = if captures.len() <= 1 {
                        vec![captures.at(0).unwrap_or_default().to_owned()]
                    } else {
                        (1..captures.len())
                            .map(|group| captures.at(group).unwrap_or_default().to_owned())
                            .collect()
                    };
                    MatchTuple(groups)
                })
                .collect::<Vec<_>>()
        }))
        .map_err(|_| PatternError::Search {
            number: self.number,
        })?;
        debug!(number = self.number, count = matches.len(), "regex matched");
        Ok(matches)
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Regex({:?})", self.pattern)
    }
}

/// The captured groups of a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchTuple(pub Vec<String>);

impl MatchTuple {
    pub fn new<S: Into<String>>(groups: impl IntoIterator<Item = S>) -> Self {
        Self(groups.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for MatchTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{group:?}")?;
        }
        write!(f, ")")
    }
}

/// Displays a list of matches as `[(..), (..)]`.
pub struct MatchList<'a>(pub &'a [MatchTuple]);

impl std::fmt::Display for MatchList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, tuple) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tuple}")?;
        }
        write!(f, "]")
    }
}
