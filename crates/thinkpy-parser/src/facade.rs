//! Parse facade
//!
//! One entry point that lexes and parses a source string in a single call.
//! Each call is independent: the parser keeps no state between programs
//! beyond its configuration.

use crate::ast::Program;
use crate::parser::Parser;
use thinkpy_error::{Result, DEFAULT_CONTEXT_LINES};
use thinkpy_lexer::{Lexer, Token};
use tracing::debug;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Lines of source shown above and below the failing line in errors
    pub context_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl ParserConfig {
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }
}

/// Reusable ThinkPy parser
///
/// ```rust
/// use thinkpy_parser::ThinkPyParser;
///
/// let mut parser = ThinkPyParser::new();
/// let program = parser
///     .parse("objective \"o\" task \"t\" { step \"s\" { x = 1 } } run \"t\"")
///     .unwrap();
/// assert_eq!(program.runs, vec!["t".to_string()]);
///
/// // a failed parse leaves the parser usable
/// assert!(parser.parse("objective").is_err());
/// assert!(parser.parse("objective \"o\" task \"t\" { step \"s\" { } } run \"t\"").is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThinkPyParser {
    config: ParserConfig,
    /// Text of the program most recently handed to `parse`
    source: String,
}

impl ThinkPyParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            source: String::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Source of the last `parse` or `tokenize` call
    pub fn last_source(&self) -> &str {
        &self.source
    }

    /// Lexes and parses a complete program
    pub fn parse(&mut self, source: &str) -> Result<Program> {
        self.reset(source);
        debug!(bytes = source.len(), "parsing ThinkPy source");

        let tokens = self.lex(source)?;
        debug!(tokens = tokens.len(), "lexing complete");

        Parser::new(source, tokens)
            .with_context_lines(self.config.context_lines)
            .parse()
    }

    /// Lexes a complete program, ending with an `Eof` token
    pub fn tokenize(&mut self, source: &str) -> Result<Vec<Token>> {
        self.reset(source);
        self.lex(source)
    }

    fn lex(&self, source: &str) -> Result<Vec<Token>> {
        Lexer::new(source)
            .with_context_lines(self.config.context_lines)
            .tokenize()
    }

    /// Replaces whatever text the previous call left behind
    fn reset(&mut self, source: &str) {
        self.source.clear();
        self.source.push_str(source);
    }
}

/// Parses `source` with a fresh default parser
pub fn parse_thinkpy(source: &str) -> Result<Program> {
    ThinkPyParser::new().parse(source)
}
