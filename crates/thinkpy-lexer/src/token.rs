//! Tokens for the ThinkPy language
//!
//! Defines all token types that the lexer can produce.

use std::fmt;
use thinkpy_error::span::Span;

/// All token types for the ThinkPy language
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // =========================================
    // Keywords - Program structure
    // =========================================
    /// `objective` - program goal
    Objective,
    /// `task` - top-level unit of work
    Task,
    /// `subtask` - statement container inside a task
    Subtask,
    /// `step` - statement container inside a task
    Step,
    /// `run` - task to execute
    Run,

    // =========================================
    // Keywords - Control flow
    // =========================================
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `then` - ends an `if`/`elif` condition
    Then,
    /// `decide` - conditional block
    Decide,
    /// `for`
    For,
    /// `in` - used in for loops
    In,
    /// `return`
    Return,

    // =========================================
    // Literals
    // =========================================
    /// String literal, quotes stripped: `"hello"`
    StringLit(String),
    /// Integer literal: `42`
    IntLit(i64),
    /// Float literal: `3.14`, `-.5`, `2e10`
    FloatLit(f64),
    /// `True` / `False`
    BoolLit(bool),
    /// Identifier: `total`, `_tmp`, `item2`
    Ident(String),

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `==`
    EqEq,
    /// `=`
    Eq,

    // =========================================
    // Punctuation and delimiters
    // =========================================
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,

    /// End of file
    Eof,
}

impl TokenKind {
    /// Looks a word up in the reserved-word table.
    ///
    /// `True` and `False` resolve to boolean literals.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "objective" => Some(TokenKind::Objective),
            "task" => Some(TokenKind::Task),
            "subtask" => Some(TokenKind::Subtask),
            "step" => Some(TokenKind::Step),
            "run" => Some(TokenKind::Run),
            "if" => Some(TokenKind::If),
            "elif" => Some(TokenKind::Elif),
            "else" => Some(TokenKind::Else),
            "then" => Some(TokenKind::Then),
            "decide" => Some(TokenKind::Decide),
            "for" => Some(TokenKind::For),
            "in" => Some(TokenKind::In),
            "return" => Some(TokenKind::Return),
            "True" => Some(TokenKind::BoolLit(true)),
            "False" => Some(TokenKind::BoolLit(false)),
            _ => None,
        }
    }

    /// Upper-case token type name, as shown in syntax errors
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Objective => "OBJECTIVE",
            TokenKind::Task => "TASK",
            TokenKind::Subtask => "SUBTASK",
            TokenKind::Step => "STEP",
            TokenKind::Run => "RUN",
            TokenKind::If => "IF",
            TokenKind::Elif => "ELIF",
            TokenKind::Else => "ELSE",
            TokenKind::Then => "THEN",
            TokenKind::Decide => "DECIDE",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::Return => "RETURN",
            TokenKind::StringLit(_) => "STRING",
            TokenKind::IntLit(_) => "NUMBER",
            TokenKind::FloatLit(_) => "FLOAT",
            TokenKind::BoolLit(_) => "BOOL",
            TokenKind::Ident(_) => "IDENTIFIER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "TIMES",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Gt => "GREATER",
            TokenKind::Lt => "LESS",
            TokenKind::EqEq => "EQUALS_EQUALS",
            TokenKind::Eq => "EQUALS",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Eof => "EOF",
        }
    }

    /// The token's value: string content without quotes, the number, or the
    /// lexeme itself for keywords and punctuation
    pub fn value(&self) -> String {
        match self {
            TokenKind::StringLit(s) | TokenKind::Ident(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Keywords
            TokenKind::Objective => write!(f, "objective"),
            TokenKind::Task => write!(f, "task"),
            TokenKind::Subtask => write!(f, "subtask"),
            TokenKind::Step => write!(f, "step"),
            TokenKind::Run => write!(f, "run"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Elif => write!(f, "elif"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::Then => write!(f, "then"),
            TokenKind::Decide => write!(f, "decide"),
            TokenKind::For => write!(f, "for"),
            TokenKind::In => write!(f, "in"),
            TokenKind::Return => write!(f, "return"),

            // Literals
            TokenKind::StringLit(s) => write!(f, "\"{}\"", s),
            TokenKind::IntLit(n) => write!(f, "{}", n),
            // Debug keeps the decimal point so `1.0` does not read back as an integer
            TokenKind::FloatLit(n) => write!(f, "{:?}", n),
            TokenKind::BoolLit(true) => write!(f, "True"),
            TokenKind::BoolLit(false) => write!(f, "False"),
            TokenKind::Ident(s) => write!(f, "{}", s),

            // Operators
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::EqEq => write!(f, "=="),
            TokenKind::Eq => write!(f, "="),

            // Punctuation
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),

            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

/// A token with its location in the source code
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type
    pub kind: TokenKind,
    /// Location in source code
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Checks if the token is of a specific type, ignoring payloads
    pub fn is(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(kind)
    }

    /// Checks if it is end of file
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Absolute byte offset of the first character
    pub fn offset(&self) -> usize {
        self.span.start.offset
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.kind, self.span.start.line, self.span.start.column
        )
    }
}
