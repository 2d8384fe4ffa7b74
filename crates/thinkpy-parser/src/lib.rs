//! thinkpy-parser - Parser for the ThinkPy language
//!
//! Converts a sequence of tokens into an AST (Abstract Syntax Tree), and
//! offers a facade that lexes and parses source text in one call.
//!
//! # Example
//!
//! ```rust
//! use thinkpy_lexer::Lexer;
//! use thinkpy_parser::{parse, Stmt};
//!
//! let source = r#"
//! objective "sum"
//! task "add" { step "s" { total = 1 + 2 } }
//! run "add"
//! "#;
//! let tokens = Lexer::new(source).tokenize().unwrap();
//!
//! let program = parse(source, tokens).unwrap();
//! assert!(matches!(
//!     program.tasks[0].body[0].statements()[0],
//!     Stmt::Assignment { .. }
//! ));
//! ```

pub mod ast;
pub mod facade;
pub mod parser;
pub mod printer;

pub use ast::*;
pub use facade::{parse_thinkpy, ParserConfig, ThinkPyParser};
pub use parser::{parse, Parser, MAX_NESTING};
