//! Lexer for the ThinkPy language
//!
//! Converts source code into a sequence of tokens. Token matching is done
//! by a `logos` DFA (longest match wins, declaration order breaks ties);
//! line and column are recomputed afterwards from absolute offsets.

use crate::token::{Token, TokenKind};
use logos::Logos;
use std::ops::Range;
use thinkpy_error::{span::Span, DiagnosticBuilder, ParseError, Result};
use tracing::{debug, trace};

/// Why the DFA rejected the input at the current position
#[derive(Debug, Clone, Default, PartialEq)]
enum LexFault {
    #[default]
    UnexpectedChar,
    InvalidNumber,
}

/// Raw tokens as matched by logos, before reserved-word lookup
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n]+")]
#[logos(error = LexFault)]
enum RawToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned())]
    Word(String),

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_owned()
    })]
    Str(String),

    #[regex(r"-?[0-9]*\.[0-9]+([eE][-+]?[0-9]+)?", parse_float)]
    #[regex(r"-?[0-9]+[eE][-+]?[0-9]+", parse_float)]
    Float(f64),

    #[regex(r"[0-9]+", parse_int)]
    Int(i64),

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
}

fn parse_int(lex: &mut logos::Lexer<RawToken>) -> std::result::Result<i64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::InvalidNumber)
}

/// Literals beyond the `f64` range are rejected rather than read as infinity
fn parse_float(lex: &mut logos::Lexer<RawToken>) -> std::result::Result<f64, LexFault> {
    match lex.slice().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(LexFault::InvalidNumber),
    }
}

impl RawToken {
    fn into_kind(self) -> TokenKind {
        match self {
            RawToken::Word(word) => {
                TokenKind::keyword_from_str(&word).unwrap_or(TokenKind::Ident(word))
            }
            RawToken::Str(s) => TokenKind::StringLit(s),
            RawToken::Float(n) => TokenKind::FloatLit(n),
            RawToken::Int(n) => TokenKind::IntLit(n),
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
        }
    }
}

/// The ThinkPy language Lexer
pub struct Lexer<'src> {
    /// Source code being analyzed
    source: &'src str,
    /// Underlying DFA
    inner: logos::Lexer<'src, RawToken>,
    /// Resolves positions and builds errors
    diagnostics: DiagnosticBuilder<'src>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: RawToken::lexer(source),
            diagnostics: DiagnosticBuilder::new(source),
        }
    }

    /// Sets the snippet window used in lexical errors
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.diagnostics = self.diagnostics.with_context_lines(context_lines);
        self
    }

    fn make_span(&self, range: Range<usize>) -> Span {
        let index = self.diagnostics.index();
        Span::new(index.position(range.start), index.position(range.end))
    }

    /// Reads the next token; returns `Eof` once the input is exhausted
    pub fn next_token(&mut self) -> Result<Token> {
        let raw = match self.inner.next() {
            Some(raw) => raw,
            None => {
                let end = self.source.len();
                return Ok(Token::new(TokenKind::Eof, self.make_span(end..end)));
            }
        };

        let range = self.inner.span();
        match raw {
            Ok(raw) => {
                let token = Token::new(raw.into_kind(), self.make_span(range));
                trace!(kind = token.kind.name(), offset = token.offset(), "token");
                Ok(token)
            }
            Err(fault) => {
                let err = self.error_at(fault, range);
                debug!(
                    offset = err.offset(),
                    line = err.line(),
                    column = err.column(),
                    "lexical error"
                );
                Err(err)
            }
        }
    }

    fn error_at(&self, fault: LexFault, range: Range<usize>) -> ParseError {
        match fault {
            LexFault::InvalidNumber => self
                .diagnostics
                .invalid_number(&self.source[range.clone()], range.start),
            LexFault::UnexpectedChar => {
                let ch = self.source[range.start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.diagnostics.illegal_character(ch, range.start)
            }
        }
    }

    /// Tokenizes the entire source code, ending with an `Eof` token
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

/// Tokenizes source code and returns the tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}
