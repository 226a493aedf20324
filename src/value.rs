use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YatError};
use crate::expr::Expr;

/// A user function: formal parameter names plus a body sequence.
///
/// Functions capture nothing. Free names in the body resolve against the scope
/// the function is called from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Vec<Expr>,
}

impl Function {
    pub fn new<S: Into<String>>(params: impl IntoIterator<Item = S>, body: Vec<Expr>) -> Self {
        Function {
            params: params.into_iter().map(Into::into).collect(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Function(Rc<Function>),
}

impl Value {
    /// Returns the integer, or a `TypeError` naming `context` for functions.
    pub fn as_number(&self, context: &str) -> Result<i64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Function(_) => Err(YatError::type_error(format!(
                "{} expects a number, found a function",
                context
            ))),
        }
    }

    pub fn as_function(&self) -> Result<Rc<Function>> {
        match self {
            Value::Function(func) => Ok(Rc::clone(func)),
            Value::Number(n) => Err(YatError::type_error(format!(
                "number {} is not callable",
                n
            ))),
        }
    }

    pub fn is_truthy(&self) -> Result<bool> {
        self.as_number("condition").map(|n| n != 0)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(Rc::new(func))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),

            Value::Function(func) => write!(f, "<function({})>", func.params.join(", ")),
        }
    }
}

/// Parses an integer the way `read` accepts it: surrounding whitespace is
/// ignored, a leading `+` or `-` is allowed, and single `_` separators may
/// sit between digits (`1_000`).
pub fn parse_number(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    let invalid = || YatError::Format(trimmed.to_string());

    let bytes = trimmed.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return Err(invalid());
    }

    trimmed
        .replace('_', "")
        .parse::<i64>()
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_signs_and_whitespace() {
        assert_eq!(parse_number(" 42\n").unwrap(), 42);
        assert_eq!(parse_number("-7").unwrap(), -7);
        assert_eq!(parse_number("+3").unwrap(), 3);
    }

    #[test]
    fn parse_accepts_digit_separators() {
        assert_eq!(parse_number("1_000\n").unwrap(), 1000);
        assert_eq!(parse_number("-2_5_0").unwrap(), -250);
        assert!(matches!(parse_number("_1"), Err(YatError::Format(_))));
        assert!(matches!(parse_number("1__0"), Err(YatError::Format(_))));
        assert!(matches!(parse_number("10_"), Err(YatError::Format(_))));
        assert!(matches!(parse_number("-_1"), Err(YatError::Format(_))));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_number("4x"), Err(YatError::Format(s)) if s == "4x"));
        assert!(matches!(parse_number(""), Err(YatError::Format(_))));
    }

    #[test]
    fn function_is_not_a_number() {
        let value = Value::from(Function::new(["a"], vec![]));
        assert!(matches!(value.as_number("print"), Err(YatError::Type(_))));
        assert_eq!(value.to_string(), "<function(a)>");
    }
}
