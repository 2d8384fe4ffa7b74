//! AST - Abstract Syntax Tree for the ThinkPy language
//!
//! Serialized with serde, every structural node carries a `type` tag
//! (`"step"`, `"assignment"`, `"for_loop"`, ...) so that downstream tools can
//! dispatch on it without knowing the Rust types.

use serde::{Deserialize, Serialize};

/// Complete program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// `objective "..."`
    pub objective: String,
    pub tasks: Vec<Task>,
    /// Task names from `run "..."`, in source order, duplicates kept
    pub runs: Vec<String>,
}

/// `task "name" { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub body: Vec<TaskItem>,
}

/// A named statement container inside a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskItem {
    /// `step "name" { ... }`
    Step { name: String, statements: Vec<Stmt> },
    /// `subtask "name" { ... }`
    Subtask { name: String, statements: Vec<Stmt> },
}

impl TaskItem {
    pub fn name(&self) -> &str {
        match self {
            TaskItem::Step { name, .. } | TaskItem::Subtask { name, .. } => name,
        }
    }

    pub fn statements(&self) -> &[Stmt] {
        match self {
            TaskItem::Step { statements, .. } | TaskItem::Subtask { statements, .. } => statements,
        }
    }

    pub fn is_subtask(&self) -> bool {
        matches!(self, TaskItem::Subtask { .. })
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stmt {
    /// `x = expr`
    Assignment { variable: String, value: Expr },

    /// `name(args)` in statement position
    FunctionCall { name: String, arguments: Vec<Expr> },

    /// `return expr`
    Return { value: Expr },

    /// `decide { if ... elif ... else ... }`
    Decide { conditions: Vec<Condition> },

    /// `for item in items { ... }`
    ForLoop {
        iterator: String,
        iterable: String,
        body: Vec<Stmt>,
    },
}

/// One branch of a `decide` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    If { condition: Expr, body: Vec<Stmt> },
    Elif { condition: Expr, body: Vec<Stmt> },
    Else { body: Vec<Stmt> },
}

impl Condition {
    pub fn body(&self) -> &[Stmt] {
        match self {
            Condition::If { body, .. } | Condition::Elif { body, .. } => body,
            Condition::Else { body } => body,
        }
    }

    /// The guard expression; `None` for `else`
    pub fn condition(&self) -> Option<&Expr> {
        match self {
            Condition::If { condition, .. } | Condition::Elif { condition, .. } => Some(condition),
            Condition::Else { .. } => None,
        }
    }

    /// The branch keyword: `"if"`, `"elif"` or `"else"`
    pub fn tag(&self) -> &'static str {
        match self {
            Condition::If { .. } => "if",
            Condition::Elif { .. } => "elif",
            Condition::Else { .. } => "else",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "==")]
    Eq,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::Eq => "==",
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Expr {
    /// `left op right`
    Operation {
        left: Box<Expr>,
        operator: BinOp,
        right: Box<Expr>,
    },

    /// `[a, b, c]`
    #[serde(rename = "list")]
    ListLit { items: Vec<Expr> },

    /// `name(args)` in expression position
    FunctionCall { name: String, arguments: Vec<Expr> },

    Identifier(String),
    IntLit(i64),
    FloatLit(f64),
    StringLit(String),
    BoolLit(bool),
}

impl Expr {
    pub fn operation(left: Expr, operator: BinOp, right: Expr) -> Self {
        Expr::Operation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}
