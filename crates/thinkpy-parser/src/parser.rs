//! Parser for the ThinkPy language
//!
//! Converts a sequence of tokens into AST using recursive descent with
//! one token of lookahead (two where an identifier may start either an
//! assignment or a call). There is no error recovery: the first token that
//! cannot extend the current production aborts the parse.

use crate::ast::*;
use thinkpy_error::{span::Span, DiagnosticBuilder, ParseError, Result};
use thinkpy_lexer::{Token, TokenKind};
use tracing::debug;

/// Deepest allowed nesting of blocks, parentheses, lists and calls combined
pub const MAX_NESTING: usize = 100;

/// Parser for the ThinkPy language
pub struct Parser<'src> {
    /// Tokens to be parsed, always ending with `Eof`
    tokens: Vec<Token>,
    /// Current position
    pos: usize,
    /// Open blocks, parentheses, lists and calls around the current token
    depth: usize,
    /// Builds syntax errors against the source text
    diagnostics: DiagnosticBuilder<'src>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser over tokens lexed from `source`
    pub fn new(source: &'src str, mut tokens: Vec<Token>) -> Self {
        let diagnostics = DiagnosticBuilder::new(source);

        if !tokens.last().is_some_and(Token::is_eof) {
            let end = diagnostics.index().position(source.len());
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }

        Self {
            tokens,
            pos: 0,
            depth: 0,
            diagnostics,
        }
    }

    /// Sets the snippet window used in syntax errors
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.diagnostics = self.diagnostics.with_context_lines(context_lines);
        self
    }

    // =========================================
    // Helpers
    // =========================================

    /// Returns the current token without advancing
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the next token without advancing
    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// Checks if the current token is of the specified type
    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is(kind)
    }

    /// Checks if we've reached the end
    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Advances to the next token, returning the consumed one
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the token if it matches the expected type
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Requires a specific token or fails at the current one
    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(expected))
        }
    }

    /// Runs `parse` one nesting level deeper, failing at the current token
    /// once `MAX_NESTING` levels are open
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_at_current("nesting too deep"));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Builds the syntax error for the current token
    fn error_at_current(&self, expected: &str) -> ParseError {
        let token = self.peek();
        debug!(
            token = token.kind.name(),
            offset = token.offset(),
            line = token.span.start.line,
            column = token.span.start.column,
            "syntax error"
        );
        self.diagnostics.unexpected_token(
            token.kind.name(),
            token.kind.value(),
            token.offset(),
            expected,
        )
    }

    // =========================================
    // Program structure
    // =========================================

    /// Parses the complete program
    pub fn parse(&mut self) -> Result<Program> {
        self.expect(
            &TokenKind::Objective,
            "expected 'objective' at the start of the program",
        )?;
        let objective = self.parse_string("expected the objective description string")?;

        let mut tasks = vec![self.parse_task("expected 'task' after the objective")?];
        while self.check(&TokenKind::Task) {
            tasks.push(self.parse_task("expected 'task'")?);
        }

        let mut runs = vec![self.parse_run("expected 'task' or 'run'")?];
        while self.check(&TokenKind::Run) {
            runs.push(self.parse_run("expected 'run'")?);
        }

        if !self.is_at_end() {
            return Err(self.error_at_current("expected 'run' or end of input"));
        }

        debug!(tasks = tasks.len(), runs = runs.len(), "parsed program");

        Ok(Program {
            objective,
            tasks,
            runs,
        })
    }

    /// Parse: `task "name" { (step | subtask)+ }`
    fn parse_task(&mut self, expected: &str) -> Result<Task> {
        self.expect(&TokenKind::Task, expected)?;
        let name = self.parse_string("expected a task name string")?;
        self.expect(&TokenKind::LBrace, "expected '{' after the task name")?;

        let mut body = vec![self.parse_task_item("expected 'step' or 'subtask'")?];
        while !self.check(&TokenKind::RBrace) {
            body.push(self.parse_task_item("expected 'step', 'subtask' or '}'")?);
        }
        self.advance(); // consume '}'

        Ok(Task { name, body })
    }

    /// Parse: `step "name" { ... }` or `subtask "name" { ... }`
    fn parse_task_item(&mut self, expected: &str) -> Result<TaskItem> {
        match &self.peek().kind {
            TokenKind::Step => {
                self.advance();
                let name = self.parse_string("expected a step name string")?;
                let statements = self.parse_block("step")?;
                Ok(TaskItem::Step { name, statements })
            }
            TokenKind::Subtask => {
                self.advance();
                let name = self.parse_string("expected a subtask name string")?;
                let statements = self.parse_block("subtask")?;
                Ok(TaskItem::Subtask { name, statements })
            }
            _ => Err(self.error_at_current(expected)),
        }
    }

    /// Parse: `run "task name"`
    fn parse_run(&mut self, expected: &str) -> Result<String> {
        self.expect(&TokenKind::Run, expected)?;
        self.parse_string("expected a task name string after 'run'")
    }

    // =========================================
    // Blocks and statements
    // =========================================

    /// Parse: `{ statement* }`
    fn parse_block(&mut self, owner: &str) -> Result<Vec<Stmt>> {
        self.nested(|p| {
            p.expect(
                &TokenKind::LBrace,
                &format!("expected '{{' to open the {} body", owner),
            )?;

            let mut statements = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                statements.push(p.parse_statement()?);
            }
            p.advance(); // consume '}'

            Ok(statements)
        })
    }

    /// Parses a statement
    fn parse_statement(&mut self) -> Result<Stmt> {
        match &self.peek().kind {
            TokenKind::Ident(_) => match &self.peek_next().kind {
                TokenKind::Eq => self.parse_assignment(),
                TokenKind::LParen => {
                    let (name, arguments) = self.parse_call()?;
                    Ok(Stmt::FunctionCall { name, arguments })
                }
                _ => {
                    self.advance(); // the identifier is fine, what follows is not
                    Err(self.error_at_current("expected '=' or '(' after identifier"))
                }
            },
            TokenKind::Return => self.parse_return(),
            TokenKind::Decide => self.parse_decide(),
            TokenKind::For => self.parse_for(),
            _ => Err(self.error_at_current("expected a statement or '}'")),
        }
    }

    /// Parse: `name = expr`
    fn parse_assignment(&mut self) -> Result<Stmt> {
        let variable = self.parse_identifier("expected a variable name")?;
        self.expect(&TokenKind::Eq, "expected '=' after variable name")?;
        let value = self.parse_expression()?;

        Ok(Stmt::Assignment { variable, value })
    }

    /// Parse: `return expr`
    fn parse_return(&mut self) -> Result<Stmt> {
        self.advance(); // consume 'return'
        let value = self.parse_expression()?;
        Ok(Stmt::Return { value })
    }

    /// Parse: `decide { if c then {..} (elif c then {..})* (else {..})? }`
    fn parse_decide(&mut self) -> Result<Stmt> {
        self.advance(); // consume 'decide'
        self.expect(&TokenKind::LBrace, "expected '{' after 'decide'")?;

        self.expect(&TokenKind::If, "expected 'if' as the first branch of 'decide'")?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Then, "expected 'then' after the condition")?;
        let body = self.parse_block("if")?;

        let mut conditions = vec![Condition::If { condition, body }];

        while self.match_token(&TokenKind::Elif) {
            let condition = self.parse_expression()?;
            self.expect(&TokenKind::Then, "expected 'then' after the condition")?;
            let body = self.parse_block("elif")?;
            conditions.push(Condition::Elif { condition, body });
        }

        let expected = if self.match_token(&TokenKind::Else) {
            let body = self.parse_block("else")?;
            conditions.push(Condition::Else { body });
            "expected '}' to close 'decide'; 'else' must be the last branch"
        } else {
            "expected 'elif', 'else' or '}'"
        };
        self.expect(&TokenKind::RBrace, expected)?;

        Ok(Stmt::Decide { conditions })
    }

    /// Parse: `for item in items { ... }`
    fn parse_for(&mut self) -> Result<Stmt> {
        self.advance(); // consume 'for'

        let iterator = self.parse_identifier("expected a loop variable after 'for'")?;
        self.expect(&TokenKind::In, "expected 'in' after the loop variable")?;
        let iterable = self.parse_identifier("expected a variable name after 'in'")?;
        let body = self.parse_block("for")?;

        Ok(Stmt::ForLoop {
            iterator,
            iterable,
            body,
        })
    }

    // =========================================
    // Expressions
    // =========================================

    /// Parse comparison: `arithmetic (('>' | '<' | '==') arithmetic)?`
    ///
    /// A second comparison operator is left unconsumed, so `a > b > c`
    /// fails at the second `>`.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        let left = self.parse_additive()?;

        let operator = match self.peek().kind {
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::EqEq => BinOp::Eq,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_additive()?;
        Ok(Expr::operation(left, operator, right))
    }

    /// Parse addition/subtraction
    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let operator = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplicative()?;
            left = Expr::operation(left, operator, right);
        }

        Ok(left)
    }

    /// Parse multiplication/division
    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let operator = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();

            let right = self.parse_term()?;
            left = Expr::operation(left, operator, right);
        }

        Ok(left)
    }

    /// Parse a term: literal, identifier, call, list or parenthesized expression
    fn parse_term(&mut self) -> Result<Expr> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Ident(name) => {
                if self.peek_next().is(&TokenKind::LParen) {
                    let (name, arguments) = self.parse_call()?;
                    Ok(Expr::FunctionCall { name, arguments })
                } else {
                    self.advance();
                    Ok(Expr::Identifier(name))
                }
            }
            TokenKind::IntLit(n) => {
                self.advance();
                Ok(Expr::IntLit(n))
            }
            TokenKind::FloatLit(n) => {
                self.advance();
                Ok(Expr::FloatLit(n))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Expr::StringLit(s))
            }
            TokenKind::BoolLit(b) => {
                self.advance();
                Ok(Expr::BoolLit(b))
            }
            TokenKind::LBracket => self.parse_list(),
            TokenKind::LParen => self.nested(|p| {
                p.advance();
                let expr = p.parse_expression()?;
                p.expect(&TokenKind::RParen, "expected ')' to close the expression")?;
                Ok(expr)
            }),
            _ => Err(self.error_at_current("expected an expression")),
        }
    }

    /// Parse: `[a, b, c]`
    fn parse_list(&mut self) -> Result<Expr> {
        self.nested(|p| {
            p.advance(); // consume '['
            let items = p.parse_expr_list(&TokenKind::RBracket)?;
            p.expect(&TokenKind::RBracket, "expected ',' or ']' in list")?;
            Ok(Expr::ListLit { items })
        })
    }

    /// Parse: `name(a, b)`; shared by statement and expression position
    fn parse_call(&mut self) -> Result<(String, Vec<Expr>)> {
        let name = self.parse_identifier("expected a function name")?;
        let arguments = self.nested(|p| {
            p.expect(&TokenKind::LParen, "expected '(' after function name")?;
            let arguments = p.parse_expr_list(&TokenKind::RParen)?;
            p.expect(&TokenKind::RParen, "expected ',' or ')' in argument list")?;
            Ok(arguments)
        })?;
        Ok((name, arguments))
    }

    /// Comma-separated expressions, possibly empty, up to `close`
    fn parse_expr_list(&mut self, close: &TokenKind) -> Result<Vec<Expr>> {
        let mut items = Vec::new();

        if !self.check(close) {
            items.push(self.parse_expression()?);
            while self.match_token(&TokenKind::Comma) {
                items.push(self.parse_expression()?);
            }
        }

        Ok(items)
    }

    // =========================================
    // Parsing helpers
    // =========================================

    fn parse_identifier(&mut self, expected: &str) -> Result<String> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error_at_current(expected))
        }
    }

    fn parse_string(&mut self, expected: &str) -> Result<String> {
        if let TokenKind::StringLit(s) = &self.peek().kind {
            let s = s.clone();
            self.advance();
            Ok(s)
        } else {
            Err(self.error_at_current(expected))
        }
    }
}

/// Helper function to parse tokens lexed from `source`
pub fn parse(source: &str, tokens: Vec<Token>) -> Result<Program> {
    Parser::new(source, tokens).parse()
}
