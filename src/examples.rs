use termcolor::{Color, WriteColor};

use crate::literal::Literal;
use crate::{cwrite, cwriteln};

#[derive(Clone, Copy, Debug)]
pub struct Example {
    pub literal: Literal,
    pub note: Option<&'static str>,
}

impl Example {
    const fn raw(source: &'static str) -> Self {
        Self {
            literal: Literal::raw(source),
            note: None,
        }
    }

    const fn processed(source: &'static str) -> Self {
        Self {
            literal: Literal::processed(source),
            note: None,
        }
    }

    const fn note(self, note: &'static str) -> Self {
        Self {
            note: Some(note),
            ..self
        }
    }
}

/// Pairs of the same text written both ways. Each entry holds the source
/// text exactly as typed between the quotes.
pub const EXAMPLES: &[Example] = &[
    Example::processed(r"This is a line of processed text.\nThis is another line of text."),
    Example::raw(r"This is a line of raw text.\nThis is another line of text."),
    Example::raw(r"D:\path\to\dir\filename.ext (raw)"),
    Example::processed(r"D:\path\to\dir\filename.ext (raw)")
        .note(r"\p and \d are invalid escapes, \t becomes a tab and \f a form feed"),
    Example::processed(r"D:\\path\\to\\dir\\filename.ext (processed)"),
    Example::raw(r"\A(.+)[.]+page[ ]\d+").note("e.g.: chapter title.........page 34"),
    Example::processed(r"\A(.+)[.]+page[ ]\d+").note(r"\A and \d are invalid escapes"),
    Example::processed(r"\\A(.+)[.]+page[ ]\\d+"),
];

/// Print each item with its 0-based position, followed by a blank line.
pub fn print_examples<W, T>(out: &mut W, examples: impl IntoIterator<Item = T>)
where
    W: WriteColor + ?Sized,
    T: std::fmt::Display,
{
    for (index, example) in examples.into_iter().enumerate() {
        cwrite!(out, fg = Color::Cyan, "example #{index}:");
        cwriteln!(out, " {example}");
        cwriteln!(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::LiteralKind;
    use pretty_assertions::assert_eq;
    use termcolor::Buffer;

    #[test]
    fn test_print_preserves_order_and_content() {
        let mut buffer = Buffer::no_color();
        print_examples(&mut buffer, ["first", "tab\there", "last\\n"]);
        assert_eq!(
            String::from_utf8_lossy(buffer.as_slice()),
            "example #0: first\n\nexample #1: tab\there\n\nexample #2: last\\n\n\n"
        );
    }

    #[test]
    fn test_print_nothing() {
        let mut buffer = Buffer::no_color();
        print_examples(&mut buffer, Vec::<String>::new());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_examples_alternate_kinds() {
        let kinds = EXAMPLES
            .iter()
            .map(|example| example.literal.kind)
            .collect::<Vec<_>>();
        use LiteralKind::*;
        assert_eq!(
            kinds,
            vec![Processed, Raw, Raw, Processed, Processed, Raw, Processed, Processed]
        );
    }

    #[test]
    fn test_all_examples_process() {
        for example in EXAMPLES {
            assert!(example.literal.value().is_ok(), "{}", example.literal);
        }
    }
}
