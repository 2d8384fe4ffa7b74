//! Property-based tests for the ThinkPy front end.
//!
//! 1. **Lexer never panics**: arbitrary input either tokenizes or fails with
//!    an offset inside the input
//! 2. **Spans are ordered**: token spans are within the input and do not overlap
//! 3. **Errors are local**: an illegal character is reported at its own line
//!    and column, however much valid source precedes it
//! 4. **Printed trees re-parse**: printing an expression tree and parsing it
//!    back gives the same tree, so precedence and associativity survive
//! 5. **Nesting limit**: nesting fails cleanly at the limit and nowhere below it
//! 6. **Printed programs re-parse**: a whole generated program survives
//!    `to_source` followed by `parse_thinkpy`

use proptest::prelude::*;

use thinkpy_lexer::{tokenize, TokenKind};
use thinkpy_parser::{
    parse_thinkpy, BinOp, Condition, Expr, Program, Stmt, Task, TaskItem, MAX_NESTING,
};
use thinkpy_tests::{assert_parse_fails_at, parse_expr, wrap_in_step};

// ============================================================================
// Generators
// ============================================================================

/// Statement lines that parse on their own inside a step
const VALID_STATEMENTS: &[&str] = &[
    "x = 1",
    "total = total + item * 2",
    "print(\"hi\", x)",
    "return [1, 2.5, True]",
    "for item in items { y = item }",
    "decide { if x > 1 then { } else { z = f() } }",
];

fn statement_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(VALID_STATEMENTS).prop_map(ToString::to_string),
        0..12,
    )
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("reserved words are not identifiers", |s| {
        TokenKind::keyword_from_str(s).is_none()
    })
}

fn operator() -> impl Strategy<Value = BinOp> {
    prop_oneof![
        Just(BinOp::Add),
        Just(BinOp::Sub),
        Just(BinOp::Mul),
        Just(BinOp::Div),
        Just(BinOp::Gt),
        Just(BinOp::Lt),
        Just(BinOp::Eq),
    ]
}

/// String literal contents; names of objectives, tasks and steps too
fn text() -> impl Strategy<Value = String> {
    "[a-z0-9 _]{0,8}"
}

/// Floats in plain and exponent notation, both signs
fn float() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-100_000i32..100_000).prop_map(|n| f64::from(n) / 100.0),
        (1u8..10, -300i32..300, any::<bool>()).prop_map(|(mantissa, exp, negative)| {
            let sign = if negative { "-" } else { "" };
            format!("{}{}e{}", sign, mantissa, exp).parse::<f64>().unwrap()
        }),
    ]
}

fn expression() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0i64..10_000).prop_map(Expr::IntLit),
        float().prop_map(Expr::FloatLit),
        text().prop_map(Expr::StringLit),
        any::<bool>().prop_map(Expr::BoolLit),
        identifier().prop_map(Expr::Identifier),
    ];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            3 => (inner.clone(), operator(), inner.clone())
                .prop_map(|(left, op, right)| Expr::operation(left, op, right)),
            1 => prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|items| Expr::ListLit { items }),
            1 => (identifier(), prop::collection::vec(inner, 0..3))
                .prop_map(|(name, arguments)| Expr::FunctionCall { name, arguments }),
        ]
    })
}

fn statement() -> impl Strategy<Value = Stmt> {
    let simple = prop_oneof![
        (identifier(), expression())
            .prop_map(|(variable, value)| Stmt::Assignment { variable, value }),
        (identifier(), prop::collection::vec(expression(), 0..3))
            .prop_map(|(name, arguments)| Stmt::FunctionCall { name, arguments }),
        expression().prop_map(|value| Stmt::Return { value }),
    ];

    simple.prop_recursive(3, 24, 3, |inner| {
        let body = prop::collection::vec(inner, 0..3);
        prop_oneof![
            (identifier(), identifier(), body.clone()).prop_map(|(iterator, iterable, body)| {
                Stmt::ForLoop {
                    iterator,
                    iterable,
                    body,
                }
            }),
            (
                (expression(), body.clone()),
                prop::collection::vec((expression(), body.clone()), 0..3),
                prop::option::of(body),
            )
                .prop_map(|((condition, body), elifs, otherwise)| {
                    let mut conditions = vec![Condition::If { condition, body }];
                    conditions.extend(
                        elifs
                            .into_iter()
                            .map(|(condition, body)| Condition::Elif { condition, body }),
                    );
                    conditions.extend(otherwise.map(|body| Condition::Else { body }));
                    Stmt::Decide { conditions }
                }),
        ]
    })
}

fn task_item() -> impl Strategy<Value = TaskItem> {
    (any::<bool>(), text(), prop::collection::vec(statement(), 0..4)).prop_map(
        |(subtask, name, statements)| {
            if subtask {
                TaskItem::Subtask { name, statements }
            } else {
                TaskItem::Step { name, statements }
            }
        },
    )
}

fn program() -> impl Strategy<Value = Program> {
    let task = (text(), prop::collection::vec(task_item(), 1..3))
        .prop_map(|(name, body)| Task { name, body });

    (
        text(),
        prop::collection::vec(task, 1..3),
        prop::collection::vec(text(), 1..3),
    )
        .prop_map(|(objective, tasks, runs)| Program {
            objective,
            tasks,
            runs,
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn lexer_never_panics(input in "\\PC{0,80}") {
        match tokenize(&input) {
            Ok(tokens) => {
                prop_assert!(tokens.last().is_some_and(|t| t.is_eof()));
            }
            Err(err) => {
                let offset = err.offset().unwrap_or(usize::MAX);
                prop_assert!(offset < input.len());
            }
        }
    }

    #[test]
    fn token_spans_are_ordered(lines in statement_lines()) {
        let source = wrap_in_step(&lines.join("\n"));
        let tokens = tokenize(&source).unwrap();

        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.end.offset <= pair[1].span.start.offset);
        }
        let last = tokens.last().unwrap();
        prop_assert_eq!(last.span.start.offset, source.len());
    }

    #[test]
    fn errors_are_reported_where_they_occur(
        lines in statement_lines(),
        split in 0usize..12,
        indent in 0usize..8,
    ) {
        let split = split.min(lines.len());
        let mut body = lines.clone();
        body.insert(split, format!("{}$", " ".repeat(indent)));

        let source = wrap_in_step(&body.join("\n"));
        // statements start on line 4
        let line = 4 + split as u32;
        let err = assert_parse_fails_at(&source, "$", line);

        prop_assert!(err.is_lex());
        prop_assert_eq!(err.column(), Some(indent as u32 + 1));
    }

    #[test]
    fn printed_expressions_parse_back(expr in expression()) {
        let printed = expr.to_string();
        let reparsed = parse_expr(&printed).unwrap();
        prop_assert_eq!(reparsed, expr);
    }

    #[test]
    fn nesting_fails_only_past_the_limit(depth in 1usize..MAX_NESTING + 20) {
        // the step body already holds one level
        let expr = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        match parse_expr(&expr) {
            Ok(parsed) => {
                prop_assert!(depth < MAX_NESTING);
                prop_assert_eq!(parsed, Expr::IntLit(1));
            }
            Err(err) => {
                prop_assert!(depth >= MAX_NESTING);
                prop_assert_eq!(err.token(), Some("("));
                let notes = &err.diagnostic().notes;
                prop_assert_eq!(notes, &vec!["nesting too deep".to_string()]);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn printed_programs_parse_back(program in program()) {
        let printed = program.to_source();
        let reparsed = parse_thinkpy(&printed);
        prop_assert_eq!(reparsed, Ok(program), "printed source:\n{}", printed);
    }
}
