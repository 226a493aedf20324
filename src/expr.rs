use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::operator::{BinaryOp, UnaryOp};
use crate::value::{Function, Value};

/// One node of a program tree. Trees are built by the caller and never
/// rewritten during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    // Integer literal
    Number(i64),

    // Lookup of a variable or function by name
    Reference(String),

    BinaryOperation(Box<Expr>, BinaryOp, Box<Expr>),

    UnaryOperation(UnaryOp, Box<Expr>),

    // condition, true branch, optional false branch
    Conditional(Box<Expr>, Vec<Expr>, Option<Vec<Expr>>),

    // Function literal; evaluates to itself
    Function(Rc<Function>),

    // Binds a name to the function its expression yields
    FunctionDefinition(String, Box<Expr>),

    // callee, arguments
    FunctionCall(Box<Expr>, Vec<Expr>),

    // Reads one integer line from input into the named variable
    Read(String),

    Print(Box<Expr>),
}

impl Expr {
    pub fn number(value: i64) -> Self {
        Expr::Number(value)
    }

    pub fn reference<S: Into<String>>(name: S) -> Self {
        Expr::Reference(name.into())
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinaryOperation(Box::new(left), op, Box::new(right))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::UnaryOperation(op, Box::new(operand))
    }

    pub fn conditional(condition: Expr, if_true: Vec<Expr>, if_false: Option<Vec<Expr>>) -> Self {
        Expr::Conditional(Box::new(condition), if_true, if_false)
    }

    pub fn function<S: Into<String>>(params: impl IntoIterator<Item = S>, body: Vec<Expr>) -> Self {
        Expr::Function(Rc::new(Function::new(params, body)))
    }

    /// Definition from either a function literal or any expression that
    /// yields a function.
    pub fn definition<S: Into<String>>(name: S, function: Expr) -> Self {
        Expr::FunctionDefinition(name.into(), Box::new(function))
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::FunctionCall(Box::new(callee), args)
    }

    pub fn read<S: Into<String>>(name: S) -> Self {
        Expr::Read(name.into())
    }

    pub fn print(expr: Expr) -> Self {
        Expr::Print(Box::new(expr))
    }

    /// Short node name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number",

            Expr::Reference(_) => "reference",

            Expr::BinaryOperation(..) => "binary operation",

            Expr::UnaryOperation(..) => "unary operation",

            Expr::Conditional(..) => "conditional",

            Expr::Function(_) => "function",

            Expr::FunctionDefinition(..) => "function definition",

            Expr::FunctionCall(..) => "function call",

            Expr::Read(_) => "read",

            Expr::Print(_) => "print",
        }
    }
}

impl From<Function> for Expr {
    fn from(function: Function) -> Self {
        Expr::Function(Rc::new(function))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Expr::Number(n),

            Value::Function(function) => Expr::Function(function),
        }
    }
}
