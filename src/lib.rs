pub mod error;
pub mod expr;
pub mod interpreter;
pub mod operator;
pub mod printer;
pub mod scope;
pub mod value;

pub use error::{Result, YatError};
pub use expr::Expr;
pub use interpreter::{Interpreter, InterpreterConfig};
pub use operator::{BinaryOp, UnaryOp};
pub use printer::PrettyPrinter;
pub use scope::{Scope, ScopeRef};
pub use value::{Function, Value};
