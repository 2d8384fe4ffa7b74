//! thinkpy-error - Position tracking and diagnostics for the ThinkPy language
//!
//! This crate maps source offsets to lines and columns and builds the
//! structured errors raised by the lexer and the grammar engine.
//!
//! # Example
//!
//! ```rust
//! use thinkpy_error::{DiagnosticBuilder, DiagnosticRenderer};
//!
//! let source = "objective \"demo\"\ntask $";
//! let builder = DiagnosticBuilder::new(source);
//! let error = builder.illegal_character('$', 22);
//!
//! assert_eq!(error.line(), Some(2));
//! let renderer = DiagnosticRenderer::new().without_colors();
//! println!("{}", renderer.render(error.diagnostic()));
//! ```

pub mod builder;
pub mod diagnostic;
pub mod position;
pub mod span;

pub use builder::{source_snippet, DiagnosticBuilder, DEFAULT_CONTEXT_LINES};
pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode};
pub use position::{column_of, line_of, LineIndex};
pub use span::{Position, Span};

use thiserror::Error;

/// Default Result type for operations that may fail with a parse error
pub type Result<T> = std::result::Result<T, ParseError>;

/// The two ways turning source text into a program can fail.
///
/// Both are terminal: the first failure ends the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input that matches no token rule
    #[error("{0}")]
    Lex(Diagnostic),
    /// A token sequence that matches no production
    #[error("{0}")]
    Syntax(Diagnostic),
}

impl ParseError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            ParseError::Lex(d) | ParseError::Syntax(d) => d,
        }
    }

    pub fn is_lex(&self) -> bool {
        matches!(self, ParseError::Lex(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }

    pub fn message(&self) -> &str {
        &self.diagnostic().message
    }

    pub fn line(&self) -> Option<u32> {
        self.diagnostic().line
    }

    pub fn column(&self) -> Option<u32> {
        self.diagnostic().column
    }

    pub fn offset(&self) -> Option<usize> {
        self.diagnostic().offset
    }

    pub fn token(&self) -> Option<&str> {
        self.diagnostic().token.as_deref()
    }

    pub fn source_snippet(&self) -> Option<&str> {
        self.diagnostic().source_snippet.as_deref()
    }
}
