//! Centralised error hierarchy for the **yat interpreter**.
//!
//! Every failure the evaluator can hit (unbound names, bad arithmetic, bad
//! input, runaway recursion) is one of the variants defined here.  None of them
//! is recovered inside the interpreter: they abort the evaluation in flight and
//! surface to whoever called `evaluate`.
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum YatError {
    /// Lookup of a name absent from the whole scope chain.
    #[error("NameError: name '{0}' is not defined")]
    Name(String),

    /// Division or modulo by zero, or an i64 overflow.
    #[error("ArithmeticError: {message} (in '{op}')")]
    Arithmetic {
        /// Operator symbol that failed.
        op: &'static str,

        /// Human‑readable description.
        message: String,
    },

    /// `read` got a line that is not an integer.
    #[error("FormatError: invalid integer literal '{0}'")]
    Format(String),

    /// `read` ran out of input.
    #[error("EndOfInputError: no more input while reading '{0}'")]
    EndOfInput(String),

    /// Nested function calls went deeper than the configured limit.
    #[error("RecursionLimitError: maximum call depth of {0} exceeded")]
    RecursionLimit(usize),

    /// A number was called, or a function was used as a number.
    #[error("TypeError: {0}")]
    Type(String),

    /// An expression that yields nothing was used where a value is needed.
    #[error("MissingValueError: {0} produced no value")]
    MissingValue(&'static str),

    /// Operator symbol that is not part of the language.
    #[error("UnknownOperatorError: '{0}'")]
    UnknownOperator(String),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl YatError {
    /// Helper constructor for arithmetic failures.
    pub fn arithmetic<S: Into<String>>(op: &'static str, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Arithmetic error: op={}, msg={}", op, message);

        YatError::Arithmetic { op, message }
    }

    /// Helper constructor for type mismatches.
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Type error: {}", message);

        YatError::Type(message)
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, YatError>;
