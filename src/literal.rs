//! String literals as they are written in source, and the values they
//! produce.
//!
//! A [`LiteralKind::Raw`] literal is taken exactly as written. A
//! [`LiteralKind::Processed`] literal has its backslash escapes interpreted.
//! Unknown escapes such as `\d` or `\p` are kept verbatim and reported as
//! [`EscapeWarning`]s, which is exactly how a regex pattern can survive a
//! processed literal by accident.

use std::iter::Peekable;
use std::str::CharIndices;

use serde::Serialize;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    #[display("raw")]
    Raw,
    #[display("processed")]
    Processed,
}

/// A literal's source text, as typed between the quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub kind: LiteralKind,
    pub source: &'static str,
}

impl Literal {
    pub const fn raw(source: &'static str) -> Self {
        Self {
            kind: LiteralKind::Raw,
            source,
        }
    }

    pub const fn processed(source: &'static str) -> Self {
        Self {
            kind: LiteralKind::Processed,
            source,
        }
    }

    pub fn value(&self) -> Result<Processed, LiteralError> {
        if self.kind.is_raw() {
            return Ok(Processed {
                value: self.source.to_owned(),
                warnings: vec![],
            });
        }
        process(self.source)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = if self.kind.is_raw() { "r" } else { "" };
        write!(f, "{prefix}\"{}\"", self.source)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Processed {
    pub value: String,
    pub warnings: Vec<EscapeWarning>,
}

/// Something suspicious in a processed literal that still produced a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscapeWarning {
    #[display("invalid escape sequence '{sequence}' at offset {offset}")]
    InvalidEscape { offset: usize, sequence: String },
    #[display("invalid octal escape sequence '{sequence}' at offset {offset}")]
    OctalOutOfRange { offset: usize, sequence: String },
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum LiteralError {
    #[error("truncated \\{escape} escape at offset {offset}")]
    TruncatedEscape { escape: char, offset: usize },
    #[error("illegal Unicode character at offset {offset}")]
    InvalidCodePoint { offset: usize },
    #[error("named Unicode escapes are not supported (offset {offset})")]
    UnsupportedNamedEscape { offset: usize },
    #[error("trailing backslash at offset {offset}")]
    TrailingBackslash { offset: usize },
}

/// Interpret the backslash escapes in `source`.
///
/// Offsets in warnings and errors are byte offsets of the backslash that
/// starts the sequence.
pub fn process(source: &str) -> Result<Processed, LiteralError> {
    let mut value = String::with_capacity(source.len());
    let mut warnings = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err(LiteralError::TrailingBackslash { offset });
        };
        match escape {
            // Line continuation
            '\n' => {}
            '\\' | '\'' | '"' => value.push(escape),
            'a' => value.push('\x07'),
            'b' => value.push('\x08'),
            'f' => value.push('\x0c'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\x0b'),
            '0'..='7' => {
                let mut code = escape as u32 - '0' as u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|&(_, d)| d.to_digit(8)) {
                        Some(digit) => {
                            chars.next();
                            code = code * 8 + digit;
                        }
                        None => break,
                    }
                }
                if code > 0o377 {
                    let end = chars.peek().map(|&(i, _)| i).unwrap_or(source.len());
                    warnings.push(EscapeWarning::OctalOutOfRange {
                        offset,
                        sequence: source[offset..end].to_owned(),
                    });
                }
                value.push(char::from_u32(code).ok_or(LiteralError::InvalidCodePoint { offset })?);
            }
            'x' => value.push(hex_escape(&mut chars, 2, escape, offset)?),
            'u' => value.push(hex_escape(&mut chars, 4, escape, offset)?),
            'U' => value.push(hex_escape(&mut chars, 8, escape, offset)?),
            'N' => return Err(LiteralError::UnsupportedNamedEscape { offset }),
            other => {
                value.push('\\');
                value.push(other);
                warnings.push(EscapeWarning::InvalidEscape {
                    offset,
                    sequence: format!("\\{other}"),
                });
            }
        }
    }

    Ok(Processed { value, warnings })
}

fn hex_escape(
    chars: &mut Peekable<CharIndices<'_>>,
    digits: usize,
    escape: char,
    offset: usize,
) -> Result<char, LiteralError> {
    let mut code = 0_u32;
    for _ in 0..digits {
        let digit = chars
            .peek()
            .and_then(|&(_, c)| c.to_digit(16))
            .ok_or(LiteralError::TruncatedEscape { escape, offset })?;
        chars.next();
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or(LiteralError::InvalidCodePoint { offset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invalid(offset: usize, sequence: &str) -> EscapeWarning {
        EscapeWarning::InvalidEscape {
            offset,
            sequence: sequence.to_owned(),
        }
    }

    #[test]
    fn test_raw_is_untouched() {
        let literal = Literal::raw(r"D:\path\to\dir\filename.ext (raw)");
        let processed = literal.value().unwrap();
        assert_eq!(processed.value, r"D:\path\to\dir\filename.ext (raw)");
        assert!(processed.warnings.is_empty());
    }

    #[test]
    fn test_windows_path_pitfall() {
        let processed = process(r"D:\path\to\dir\filename.ext (raw)").unwrap();
        assert_eq!(processed.value, "D:\\path\to\\dir\x0cilename.ext (raw)");
        assert_eq!(processed.warnings, vec![invalid(2, r"\p"), invalid(10, r"\d")]);
    }

    #[test]
    fn test_regex_pitfall() {
        let processed = process(r"\A(.+)[.]+page[ ]\d+").unwrap();
        assert_eq!(processed.value, r"\A(.+)[.]+page[ ]\d+");
        assert_eq!(processed.warnings, vec![invalid(0, r"\A"), invalid(17, r"\d")]);
    }

    #[test]
    fn test_agrees_with_rust_escapes() {
        let processed = process(r"\\A([^.]+(?=[.]+))([.]+page )(\\d+)").unwrap();
        assert_eq!(processed.value, "\\A([^.]+(?=[.]+))([.]+page )(\\d+)");
        assert!(processed.warnings.is_empty());

        let processed = process(r#"a\nb\tc\rd\'e\"f\\g\0"#).unwrap();
        assert_eq!(processed.value, "a\nb\tc\rd'e\"f\\g\0");
    }

    #[test]
    fn test_numeric_escapes() {
        let processed = process(r"\x41\u00e9\U0001F600\101\7").unwrap();
        assert_eq!(processed.value, "A\u{e9}\u{1F600}A\x07");
        assert!(processed.warnings.is_empty());

        let processed = process(r"\a\b\v\f").unwrap();
        assert_eq!(processed.value, "\x07\x08\x0b\x0c");
    }

    #[test]
    fn test_octal_out_of_range() {
        let processed = process(r"x\777y").unwrap();
        assert_eq!(processed.value, "x\u{1ff}y");
        assert_eq!(
            processed.warnings,
            vec![EscapeWarning::OctalOutOfRange {
                offset: 1,
                sequence: r"\777".to_owned()
            }]
        );
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(process("first \\\nsecond").unwrap().value, "first second");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            process(r"\x4"),
            Err(LiteralError::TruncatedEscape {
                escape: 'x',
                offset: 0
            })
        );
        assert_eq!(
            process(r"ab\u12g4"),
            Err(LiteralError::TruncatedEscape {
                escape: 'u',
                offset: 2
            })
        );
        assert_eq!(
            process(r"\ud800"),
            Err(LiteralError::InvalidCodePoint { offset: 0 })
        );
        assert_eq!(
            process(r"\U00110000"),
            Err(LiteralError::InvalidCodePoint { offset: 0 })
        );
        assert_eq!(
            process(r"\N{EM DASH}"),
            Err(LiteralError::UnsupportedNamedEscape { offset: 0 })
        );
        assert_eq!(
            process("abc\\"),
            Err(LiteralError::TrailingBackslash { offset: 3 })
        );
    }

    #[test]
    fn test_kind_decides_processing() {
        let raw = Literal::raw(r"\t");
        assert!(raw.kind.is_raw());
        assert_eq!(raw.value().unwrap().value, r"\t");

        let processed = Literal::processed(r"\t");
        assert!(processed.kind.is_processed());
        assert_eq!(processed.value().unwrap().value, "\t");
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::raw(r"\d+").to_string(), r#"r"\d+""#);
        assert_eq!(Literal::processed(r"\\d+").to_string(), r#""\\d+""#);
        assert_eq!(
            invalid(0, r"\A").to_string(),
            r"invalid escape sequence '\A' at offset 0"
        );
    }
}
