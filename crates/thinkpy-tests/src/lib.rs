//! Integration tests for the ThinkPy language
//!
//! This crate provides end-to-end testing of the complete front end:
//! Source → Lexer → Parser → AST (→ printer → Parser)

use thinkpy_error::{ParseError, Result};
use thinkpy_parser::{parse_thinkpy, Expr, Program, Stmt};

/// Lexes and parses a complete program
pub fn parse_source(source: &str) -> Result<Program> {
    parse_thinkpy(source)
}

/// Asserts that source code parses without errors
pub fn assert_parses(source: &str) -> Program {
    match parse_source(source) {
        Ok(program) => program,
        Err(e) => panic!(
            "Expected source to parse, but got error:\n{}\n{:?}",
            e,
            e.diagnostic()
        ),
    }
}

/// Asserts that source code fails to parse
pub fn assert_parse_fails(source: &str) -> ParseError {
    match parse_source(source) {
        Ok(program) => panic!(
            "Expected source to fail parsing, but it succeeded:\n{:?}",
            program
        ),
        Err(e) => e,
    }
}

/// Asserts that parsing fails on `token` at `line`
pub fn assert_parse_fails_at(source: &str, token: &str, line: u32) -> ParseError {
    let err = assert_parse_fails(source);
    assert_eq!(
        err.token(),
        Some(token),
        "wrong offending token for error: {}",
        err
    );
    assert_eq!(err.line(), Some(line), "wrong line for error: {}", err);
    err
}

/// Wraps statement lines in a one-step program; the first statement line is line 4
pub fn wrap_in_step(body: &str) -> String {
    format!(
        "objective \"test\"\ntask \"t\" {{\n  step \"s\" {{\n{}\n  }}\n}}\nrun \"t\"\n",
        body
    )
}

/// Parses `expr` as the right-hand side of an assignment
pub fn parse_expr(expr: &str) -> Result<Expr> {
    let program = parse_source(&wrap_in_step(&format!("x = {}", expr)))?;
    match &program.tasks[0].body[0].statements()[0] {
        Stmt::Assignment { value, .. } => Ok(value.clone()),
        other => panic!("Expected Assignment, got {:?}", other),
    }
}

/// Helper to parse a program from the demos directory
#[cfg(test)]
fn parse_demo_file(filename: &str) -> Result<Program> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join(filename);

    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));

    parse_source(&source)
}


#[cfg(test)]
mod error_tests {
    use super::*;
    use thinkpy_parser::MAX_NESTING;

    #[test]
    fn test_missing_expression() {
        let source = "objective \"demo\" task \"t1\" { step \"s1\" { x = } }";
        let err = assert_parse_fails_at(source, "}", 1);

        assert!(err.is_syntax());
        assert_eq!(err.message(), "Syntax error at token RBRACE");
        assert_eq!(err.offset(), Some(45));
        assert_eq!(err.column(), Some(45));
        assert!(err.source_snippet().unwrap().starts_with("-> 1: objective"));
    }

    #[test]
    fn test_illegal_character() {
        let source = "objective \"o\"\ntask \"t\" { step \"s\" { x = 1 ? 2 } }\nrun \"t\"";
        let err = assert_parse_fails_at(source, "?", 2);

        assert!(err.is_lex());
        assert_eq!(err.message(), "Illegal character '?'");
    }

    #[test]
    fn test_unterminated_string() {
        let err = assert_parse_fails("objective \"never closed");
        assert!(err.is_lex());
        assert_eq!(err.token(), Some("\""));
        assert_eq!(err.offset(), Some(10));
    }

    #[test]
    fn test_elif_after_else() {
        let source = wrap_in_step("decide {\n if a then { }\n else { }\n elif b then { }\n}");
        let err = assert_parse_fails_at(&source, "elif", 7);
        assert_eq!(err.message(), "Syntax error at token ELIF");
    }

    #[test]
    fn test_else_without_if() {
        let source = wrap_in_step("decide { else { } }");
        assert_parse_fails_at(&source, "else", 4);
    }

    #[test]
    fn test_chained_comparison() {
        let source = wrap_in_step("ok = 1 < 2 < 3");
        let err = assert_parse_fails_at(&source, "<", 4);
        assert_eq!(err.offset(), source.find("2 < 3").map(|i| i + 2));
    }

    #[test]
    fn test_statement_outside_step() {
        let source = "objective \"o\"\ntask \"t\" {\n  x = 1\n}\nrun \"t\"";
        let err = assert_parse_fails_at(source, "x", 3);
        assert_eq!(err.message(), "Syntax error at token IDENTIFIER");
    }

    #[test]
    fn test_empty_task() {
        assert_parse_fails_at("objective \"o\"\ntask \"t\" { }\nrun \"t\"", "}", 2);
    }

    #[test]
    fn test_missing_run() {
        let source = "objective \"o\"\ntask \"t\" { step \"s\" { } }\n";
        let err = assert_parse_fails_at(source, "EOF", 3);
        assert_eq!(err.offset(), Some(source.len()));
    }

    #[test]
    fn test_empty_input() {
        let err = assert_parse_fails_at("", "EOF", 1);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_nothing_after_runs() {
        let source = "objective \"o\" task \"t\" { step \"s\" { } } run \"t\" task \"u\" { step \"s\" { } }";
        assert_parse_fails_at(source, "task", 1);
    }

    #[test]
    fn test_reserved_word_as_variable() {
        let source = wrap_in_step("step = 1");
        assert_parse_fails_at(&source, "step", 4);
    }

    #[test]
    fn test_integer_overflow() {
        let source = wrap_in_step("x = 99999999999999999999");
        let err = assert_parse_fails_at(&source, "99999999999999999999", 4);
        assert!(err.is_lex());
    }

    #[test]
    fn test_float_overflow() {
        let source = wrap_in_step("ok = 1e308\nx = 1e400");
        let err = assert_parse_fails_at(&source, "1e400", 5);
        assert!(err.is_lex());
        assert_eq!(err.message(), "Invalid number literal '1e400'");
    }

    #[test]
    fn test_deep_nesting() {
        let parens = format!("x = {}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = assert_parse_fails_at(&wrap_in_step(&parens), "(", 4);
        assert!(err.is_syntax());
        assert_eq!(err.diagnostic().notes, vec!["nesting too deep"]);

        let blocks = "for a in b {\n".repeat(MAX_NESTING);
        let err = assert_parse_fails_at(&wrap_in_step(&blocks), "{", 3 + MAX_NESTING as u32);
        assert_eq!(err.diagnostic().notes, vec!["nesting too deep"]);
    }
}
