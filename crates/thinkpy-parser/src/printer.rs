//! Source printer
//!
//! Renders a [`Program`] back to ThinkPy source. Nested operations are
//! always parenthesized, so printing a parsed tree and parsing the output
//! yields the same tree.

use crate::ast::*;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Operation {
                left,
                operator,
                right,
            } => {
                write_operand(f, left)?;
                write!(f, " {} ", operator)?;
                write_operand(f, right)
            }
            Expr::ListLit { items } => {
                f.write_char('[')?;
                write_comma_separated(f, items)?;
                f.write_char(']')
            }
            Expr::FunctionCall { name, arguments } => write_call(f, name, arguments),
            Expr::Identifier(name) => f.write_str(name),
            Expr::IntLit(n) => write!(f, "{}", n),
            // Debug keeps `2.0` distinct from the integer `2`
            Expr::FloatLit(n) => write!(f, "{:?}", n),
            Expr::StringLit(s) => write!(f, "\"{}\"", s),
            Expr::BoolLit(true) => f.write_str("True"),
            Expr::BoolLit(false) => f.write_str("False"),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Operation { .. } => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, arguments: &[Expr]) -> fmt::Result {
    write!(f, "{}(", name)?;
    write_comma_separated(f, arguments)?;
    f.write_char(')')
}

/// A call in statement position, printed like its expression form
struct Call<'a>(&'a str, &'a [Expr]);

impl fmt::Display for Call<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_call(f, self.0, self.1)
    }
}

/// Writes indented lines into a formatter
struct SourceWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    depth: usize,
}

impl<'a, 'b> SourceWriter<'a, 'b> {
    fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, depth: 0 }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            self.f.write_str(INDENT)?;
        }
        self.f.write_fmt(args)?;
        self.f.write_char('\n')
    }

    /// `header { statements }`, collapsed to `header { }` when empty
    fn block(&mut self, header: fmt::Arguments<'_>, statements: &[Stmt]) -> fmt::Result {
        if statements.is_empty() {
            return self.line(format_args!("{} {{ }}", header));
        }

        self.line(format_args!("{} {{", header))?;
        self.depth += 1;
        for stmt in statements {
            self.stmt(stmt)?;
        }
        self.depth -= 1;
        self.line(format_args!("}}"))
    }

    fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        match stmt {
            Stmt::Assignment { variable, value } => {
                self.line(format_args!("{} = {}", variable, value))
            }
            Stmt::FunctionCall { name, arguments } => {
                self.line(format_args!("{}", Call(name, arguments)))
            }
            Stmt::Return { value } => self.line(format_args!("return {}", value)),
            Stmt::Decide { conditions } => {
                self.line(format_args!("decide {{"))?;
                self.depth += 1;
                for branch in conditions {
                    match branch.condition() {
                        Some(guard) => self.block(
                            format_args!("{} {} then", branch.tag(), guard),
                            branch.body(),
                        )?,
                        None => self.block(format_args!("{}", branch.tag()), branch.body())?,
                    }
                }
                self.depth -= 1;
                self.line(format_args!("}}"))
            }
            Stmt::ForLoop {
                iterator,
                iterable,
                body,
            } => self.block(format_args!("for {} in {}", iterator, iterable), body),
        }
    }

    fn task(&mut self, task: &Task) -> fmt::Result {
        self.line(format_args!("task \"{}\" {{", task.name))?;
        self.depth += 1;
        for item in &task.body {
            let keyword = if item.is_subtask() { "subtask" } else { "step" };
            self.block(
                format_args!("{} \"{}\"", keyword, item.name()),
                item.statements(),
            )?;
        }
        self.depth -= 1;
        self.line(format_args!("}}"))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        SourceWriter::new(f).stmt(self)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = SourceWriter::new(f);
        writer.line(format_args!("objective \"{}\"", self.objective))?;
        for task in &self.tasks {
            writer.task(task)?;
        }
        for run in &self.runs {
            writer.line(format_args!("run \"{}\"", run))?;
        }
        Ok(())
    }
}

impl Program {
    /// Canonical source text for this program
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_operations_are_parenthesized() {
        let expr = Expr::operation(
            Expr::operation(Expr::IntLit(1), BinOp::Add, Expr::IntLit(2)),
            BinOp::Mul,
            Expr::FloatLit(3.0),
        );
        assert_eq!(expr.to_string(), "(1 + 2) * 3.0");
    }

    #[test]
    fn test_literals() {
        let expr = Expr::ListLit {
            items: vec![
                Expr::StringLit("a b".into()),
                Expr::BoolLit(true),
                Expr::FunctionCall {
                    name: "len".into(),
                    arguments: vec![Expr::Identifier("xs".into())],
                },
            ],
        };
        assert_eq!(expr.to_string(), "[\"a b\", True, len(xs)]");
    }

    #[test]
    fn test_program_layout() {
        let program = Program {
            objective: "demo".into(),
            tasks: vec![Task {
                name: "t1".into(),
                body: vec![
                    TaskItem::Step {
                        name: "s1".into(),
                        statements: vec![
                            Stmt::Assignment {
                                variable: "x".into(),
                                value: Expr::operation(
                                    Expr::IntLit(1),
                                    BinOp::Add,
                                    Expr::IntLit(2),
                                ),
                            },
                            Stmt::Decide {
                                conditions: vec![
                                    Condition::If {
                                        condition: Expr::operation(
                                            Expr::Identifier("x".into()),
                                            BinOp::Gt,
                                            Expr::IntLit(2),
                                        ),
                                        body: vec![Stmt::Return {
                                            value: Expr::Identifier("x".into()),
                                        }],
                                    },
                                    Condition::Else { body: vec![] },
                                ],
                            },
                        ],
                    },
                    TaskItem::Subtask {
                        name: "s2".into(),
                        statements: vec![Stmt::ForLoop {
                            iterator: "i".into(),
                            iterable: "xs".into(),
                            body: vec![Stmt::FunctionCall {
                                name: "print".into(),
                                arguments: vec![Expr::Identifier("i".into())],
                            }],
                        }],
                    },
                ],
            }],
            runs: vec!["t1".into(), "t1".into()],
        };

        let expected = r#"objective "demo"
task "t1" {
    step "s1" {
        x = 1 + 2
        decide {
            if x > 2 then {
                return x
            }
            else { }
        }
    }
    subtask "s2" {
        for i in xs {
            print(i)
        }
    }
}
run "t1"
run "t1"
"#;
        assert_eq!(program.to_source(), expected);
    }
}
