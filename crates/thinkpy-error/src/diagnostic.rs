//! Diagnostic - structured error reports
//!
//! A diagnostic carries everything a caller needs to show a failure
//! without going back to the source:
//! - Error code (EL001, EP001, etc.)
//! - Line, column and absolute offset
//! - The offending token text
//! - A numbered source snippet with the failing line marked

use crate::span::Position;
use std::fmt;

/// Structured error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Category (L = Lexer, P = Parser)
    pub category: char,
    /// Error number
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Lexer errors
    pub const UNEXPECTED_CHAR: Self = Self::new('L', 1);
    pub const INVALID_NUMBER: Self = Self::new('L', 3);

    // Parser errors
    pub const UNEXPECTED_TOKEN: Self = Self::new('P', 1);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete diagnostic
///
/// Every location field is optional: errors raised outside the lexer and
/// grammar engine may know nothing beyond their message, and renderers
/// must still be able to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error code (optional)
    pub code: Option<ErrorCode>,
    /// Main message
    pub message: String,
    /// Absolute byte offset of the failure
    pub offset: Option<usize>,
    /// Line (1-indexed)
    pub line: Option<u32>,
    /// Column, as computed by [`crate::column_of`]
    pub column: Option<u32>,
    /// Text of the offending token or character
    pub token: Option<String>,
    /// Numbered lines around the failure, failing line marked with `->`
    pub source_snippet: Option<String>,
    /// Additional notes
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            offset: None,
            line: None,
            column: None,
            token: None,
            source_snippet: None,
            notes: Vec::new(),
        }
    }

    /// Sets the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets offset, line and column from a resolved position
    pub fn with_position(mut self, position: Position) -> Self {
        self.offset = Some(position.offset);
        self.line = Some(position.line);
        self.column = Some(position.column);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.source_snippet = Some(snippet.into());
        self
    }

    /// Adds a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

const UNKNOWN: &str = "unknown";

/// Renders a diagnostic for display
pub struct DiagnosticRenderer {
    use_colors: bool,
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticRenderer {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Renders the diagnostic as a string
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let reset = if self.use_colors { "\x1b[0m" } else { "" };
        let red = if self.use_colors { "\x1b[1;31m" } else { "" };
        let bold = if self.use_colors { "\x1b[1m" } else { "" };

        // ThinkPy Error[EP001]: message
        output.push_str(red);
        output.push_str("ThinkPy Error");
        if let Some(code) = &diagnostic.code {
            output.push('[');
            output.push_str(&code.to_string());
            output.push(']');
        }
        output.push_str(reset);
        output.push_str(bold);
        output.push_str(": ");
        output.push_str(&diagnostic.message);
        output.push_str(reset);
        output.push('\n');

        let line = diagnostic
            .line
            .map_or_else(|| UNKNOWN.to_string(), |l| l.to_string());
        let column = diagnostic
            .column
            .map_or_else(|| UNKNOWN.to_string(), |c| c.to_string());
        output.push_str(&format!("Line: {}\n", line));
        output.push_str(&format!("Column: {}\n", column));

        match &diagnostic.token {
            Some(token) => output.push_str(&format!("Context: Near token '{}'\n", token)),
            None => output.push_str(&format!("Context: Near token {}\n", UNKNOWN)),
        }

        match &diagnostic.source_snippet {
            Some(snippet) if !snippet.is_empty() => {
                output.push_str("Source code:\n");
                for snippet_line in snippet.lines() {
                    if snippet_line.starts_with("->") {
                        output.push_str(red);
                        output.push_str(snippet_line);
                        output.push_str(reset);
                    } else {
                        output.push_str(snippet_line);
                    }
                    output.push('\n');
                }
            }
            _ => output.push_str(&format!("Source code: {}\n", UNKNOWN)),
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  = {}note{}: {}\n", bold, reset, note));
        }

        output
    }
}
