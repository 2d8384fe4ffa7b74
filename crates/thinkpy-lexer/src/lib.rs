//! thinkpy-lexer - Lexer/Tokenizer for the ThinkPy language
//!
//! This crate converts ThinkPy source code into a sequence of tokens.
//!
//! # Features
//!
//! - Reserved words for program structure (objective, task, step, ...)
//! - `True` / `False` as boolean literals
//! - Literals: integers, floats (optionally signed), strings
//! - Absolute offsets plus derived line/column on every token
//!
//! # Example
//!
//! ```rust
//! use thinkpy_lexer::{Lexer, TokenKind};
//!
//! let source = r#"
//! objective "greet"
//! task "hello" { step "say" { print("hi") } }
//! run "hello"
//! "#;
//!
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.tokenize().expect("valid tokens");
//!
//! assert_eq!(tokens[0].kind, TokenKind::Objective);
//! ```

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
