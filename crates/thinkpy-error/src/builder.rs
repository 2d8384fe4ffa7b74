//! Diagnostics builder
//!
//! Turns a failing offset into a fully populated [`Diagnostic`]: resolved
//! position, offending token text and a windowed source snippet.

use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::position::LineIndex;
use crate::ParseError;

/// Lines shown above and below the failing line by default
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Builds the numbered snippet around `line`.
///
/// Every line is rendered as `"   <n>: <text>"`, except the failing one which
/// gets the `"-> "` marker. The window is clamped to the buffer.
pub fn source_snippet(index: &LineIndex<'_>, line: u32, context_lines: usize) -> String {
    let failing = (line as usize).saturating_sub(1).min(index.line_count() - 1);
    let first = failing.saturating_sub(context_lines);
    let last = (failing + context_lines + 1).min(index.line_count());

    (first..last)
        .map(|i| {
            let prefix = if i == failing { "-> " } else { "   " };
            let text = index.line_text(i as u32 + 1).unwrap_or_default();
            format!("{}{}: {}", prefix, i + 1, text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates lexer and parser errors for one source buffer
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder<'src> {
    index: LineIndex<'src>,
    context_lines: usize,
}

impl<'src> DiagnosticBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            index: LineIndex::new(source),
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }

    /// Sets how many lines above and below the failing line the snippet shows
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn index(&self) -> &LineIndex<'src> {
        &self.index
    }

    /// Diagnostic located at `offset`, with position and snippet filled in
    pub fn at(&self, message: impl Into<String>, offset: usize) -> Diagnostic {
        let position = self.index.position(offset);
        let snippet = source_snippet(&self.index, position.line, self.context_lines);
        Diagnostic::error(message)
            .with_position(position)
            .with_snippet(snippet)
    }

    /// A character that starts no token
    pub fn illegal_character(&self, ch: char, offset: usize) -> ParseError {
        ParseError::Lex(
            self.at(format!("Illegal character '{}'", ch), offset)
                .with_code(ErrorCode::UNEXPECTED_CHAR)
                .with_token(ch.to_string()),
        )
    }

    /// A numeric literal that does not fit its type
    pub fn invalid_number(&self, lexeme: &str, offset: usize) -> ParseError {
        ParseError::Lex(
            self.at(format!("Invalid number literal '{}'", lexeme), offset)
                .with_code(ErrorCode::INVALID_NUMBER)
                .with_token(lexeme),
        )
    }

    /// A token that cannot extend the current production
    pub fn unexpected_token(
        &self,
        token_type: &str,
        value: impl Into<String>,
        offset: usize,
        expected: &str,
    ) -> ParseError {
        ParseError::Syntax(
            self.at(format!("Syntax error at token {}", token_type), offset)
                .with_code(ErrorCode::UNEXPECTED_TOKEN)
                .with_token(value)
                .with_note(expected),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven";

    #[test]
    fn test_snippet_window_in_middle() {
        let index = LineIndex::new(SOURCE);
        assert_eq!(
            source_snippet(&index, 4, 2),
            "   2: two\n   3: three\n-> 4: four\n   5: five\n   6: six"
        );
    }

    #[test]
    fn test_snippet_clamped_at_start() {
        let index = LineIndex::new(SOURCE);
        assert_eq!(source_snippet(&index, 1, 2), "-> 1: one\n   2: two\n   3: three");
    }

    #[test]
    fn test_snippet_clamped_at_end() {
        let index = LineIndex::new(SOURCE);
        assert_eq!(source_snippet(&index, 7, 2), "   5: five\n   6: six\n-> 7: seven");
    }

    #[test]
    fn test_snippet_custom_window() {
        let index = LineIndex::new(SOURCE);
        assert_eq!(source_snippet(&index, 4, 0), "-> 4: four");
        assert_eq!(source_snippet(&index, 4, 10).lines().count(), 7);
    }

    #[test]
    fn test_snippet_single_line_source() {
        let index = LineIndex::new("x = $");
        assert_eq!(source_snippet(&index, 1, 2), "-> 1: x = $");
    }

    #[test]
    fn test_illegal_character_error() {
        let builder = DiagnosticBuilder::new("x = 1\ny = $\n");
        let err = builder.illegal_character('$', 10);

        assert!(err.is_lex());
        assert_eq!(err.message(), "Illegal character '$'");
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.column(), Some(5));
        assert_eq!(err.token(), Some("$"));
        assert_eq!(err.source_snippet(), Some("   1: x = 1\n-> 2: y = $\n   3: "));
    }

    #[test]
    fn test_unexpected_token_error() {
        let builder = DiagnosticBuilder::new("run run").with_context_lines(0);
        let err = builder.unexpected_token("RUN", "run", 4, "expected a task name string");

        assert!(err.is_syntax());
        assert_eq!(err.message(), "Syntax error at token RUN");
        assert_eq!(err.line(), Some(1));
        assert_eq!(err.column(), Some(4));
        assert_eq!(err.offset(), Some(4));
        assert_eq!(err.diagnostic().notes, vec!["expected a task name string".to_string()]);
        assert_eq!(err.source_snippet(), Some("-> 1: run run"));
    }
}
