use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::error::{Result, YatError};
use crate::expr::Expr;
use crate::operator::{BinaryOp, UnaryOp};
use crate::scope::{Scope, ScopeRef};
use crate::value::{parse_number, Function, Value};

/// Minimum stack space to keep available before descending into a node.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Tunables for a single interpreter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Deepest chain of nested user function calls before `RecursionLimit`.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: 1000,
        }
    }
}

/// Tree-walking evaluator. Owns the input and output channels used by
/// `read` and `print`; variables live in the scopes handed to it.
pub struct Interpreter<R, W> {
    input: R,
    output: W,
    config: InterpreterConfig,
    call_depth: usize,
}

impl Interpreter<StdinLock<'static>, Stdout> {
    /// Interpreter wired to the process stdin and stdout.
    pub fn stdio(config: InterpreterConfig) -> Self {
        Interpreter::with_config(io::stdin().lock(), io::stdout(), config)
    }
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Interpreter::with_config(input, output, InterpreterConfig::default())
    }

    pub fn with_config(input: R, output: W, config: InterpreterConfig) -> Self {
        info!("Initializing Interpreter with {:?}", config);

        Interpreter {
            input,
            output,
            config,
            call_depth: 0,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Evaluates `program` in order in `scope`; the last result wins.
    /// An empty sequence yields no value.
    pub fn run(&mut self, program: &[Expr], scope: &ScopeRef) -> Result<Option<Value>> {
        debug!("Running sequence of {} expressions", program.len());

        let mut result = None;

        for expr in program {
            result = self.evaluate(expr, scope)?;
        }

        Ok(result)
    }

    /// Evaluates a single node. Only conditionals and calls can yield no value.
    pub fn evaluate(&mut self, expr: &Expr, scope: &ScopeRef) -> Result<Option<Value>> {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            self.evaluate_node(expr, scope)
        })
    }

    fn evaluate_node(&mut self, expr: &Expr, scope: &ScopeRef) -> Result<Option<Value>> {
        debug!("Evaluating {}", expr.kind());

        let value = match expr {
            Expr::Number(n) => Value::Number(*n),

            Expr::Reference(name) => scope.borrow().get(name)?,

            Expr::BinaryOperation(left, op, right) => {
                self.evaluate_binary(left, *op, right, scope)?
            }

            Expr::UnaryOperation(op, operand) => self.evaluate_unary(*op, operand, scope)?,

            Expr::Conditional(condition, if_true, if_false) => {
                return self.evaluate_conditional(condition, if_true, if_false.as_deref(), scope);
            }

            Expr::Function(function) => Value::Function(Rc::clone(function)),

            Expr::FunctionDefinition(name, function) => {
                self.evaluate_definition(name, function, scope)?
            }

            Expr::FunctionCall(callee, args) => return self.evaluate_call(callee, args, scope),

            Expr::Read(name) => self.evaluate_read(name, scope)?,

            Expr::Print(expr) => self.evaluate_print(expr, scope)?,
        };

        Ok(Some(value))
    }

    /// Evaluates a node whose result is required.
    fn evaluate_value(&mut self, expr: &Expr, scope: &ScopeRef) -> Result<Value> {
        self.evaluate(expr, scope)?
            .ok_or(YatError::MissingValue(expr.kind()))
    }

    fn evaluate_number(&mut self, expr: &Expr, scope: &ScopeRef, context: &str) -> Result<i64> {
        self.evaluate_value(expr, scope)?.as_number(context)
    }

    // Both operands always run, left first, even for `&&` and `||`.
    fn evaluate_binary(
        &mut self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        scope: &ScopeRef,
    ) -> Result<Value> {
        let left_val = self.evaluate_number(left, scope, op.symbol())?;
        let right_val = self.evaluate_number(right, scope, op.symbol())?;

        op.apply(left_val, right_val).map(Value::Number)
    }

    fn evaluate_unary(&mut self, op: UnaryOp, operand: &Expr, scope: &ScopeRef) -> Result<Value> {
        let operand_val = self.evaluate_number(operand, scope, op.symbol())?;

        op.apply(operand_val).map(Value::Number)
    }

    // Branches run in the caller's scope; no child scope is created.
    fn evaluate_conditional(
        &mut self,
        condition: &Expr,
        if_true: &[Expr],
        if_false: Option<&[Expr]>,
        scope: &ScopeRef,
    ) -> Result<Option<Value>> {
        if self.evaluate_value(condition, scope)?.is_truthy()? {
            debug!("Condition is truthy; running true branch");
            self.run(if_true, scope)
        } else if let Some(if_false) = if_false {
            debug!("Condition is falsy; running false branch");
            self.run(if_false, scope)
        } else {
            debug!("Condition is falsy and there is no false branch");
            Ok(None)
        }
    }

    fn evaluate_definition(&mut self, name: &str, function: &Expr, scope: &ScopeRef) -> Result<Value> {
        let function = self.evaluate_value(function, scope)?.as_function()?;

        scope
            .borrow_mut()
            .set(name, Value::Function(Rc::clone(&function)));

        info!(
            "Function '{}' defined with {} parameters",
            name,
            function.params.len()
        );

        Ok(Value::Function(function))
    }

    /// Call protocol: resolve the callee in the caller's scope, evaluate the
    /// arguments there too, bind them positionally into a fresh child scope
    /// and run the body in that child.
    fn evaluate_call(&mut self, callee: &Expr, args: &[Expr], scope: &ScopeRef) -> Result<Option<Value>> {
        let function = self.evaluate_value(callee, scope)?.as_function()?;
        let local = Scope::child(scope);

        for (index, arg) in args.iter().enumerate() {
            match function.params.get(index) {
                Some(param) => {
                    let value = self.evaluate_value(arg, scope)?;
                    debug!("Binding parameter '{}' to {}", param, value);
                    local.borrow_mut().set(param, value);
                }

                None => {
                    debug!("Evaluating surplus argument {} for its effects", index);
                    self.evaluate(arg, scope)?;
                }
            }
        }

        self.invoke(&function, &local)
    }

    fn invoke(&mut self, function: &Function, local: &ScopeRef) -> Result<Option<Value>> {
        if self.call_depth >= self.config.max_call_depth {
            debug!("Call depth {} hit the limit", self.call_depth);
            return Err(YatError::RecursionLimit(self.config.max_call_depth));
        }

        self.call_depth += 1;
        debug!("Entering function body at depth {}", self.call_depth);

        let result = self.run(&function.body, local);

        self.call_depth -= 1;

        result
    }

    fn evaluate_read(&mut self, name: &str, scope: &ScopeRef) -> Result<Value> {
        let mut line = Vec::new();

        if self.input.read_until(b'\n', &mut line)? == 0 {
            debug!("Input exhausted while reading '{}'", name);
            return Err(YatError::EndOfInput(name.to_string()));
        }

        let text = std::str::from_utf8(&line)
            .map_err(|_| YatError::Format(String::from_utf8_lossy(&line).trim().to_string()))?;
        let value = Value::Number(parse_number(text)?);
        scope.borrow_mut().set(name, value.clone());

        info!("Read {} into '{}'", value, name);

        Ok(value)
    }

    fn evaluate_print(&mut self, expr: &Expr, scope: &ScopeRef) -> Result<Value> {
        let n = self.evaluate_number(expr, scope, "print")?;

        let mut buf = itoa::Buffer::new();
        self.output.write_all(buf.format(n).as_bytes())?;
        self.output.write_all(b"\n")?;
        self.output.flush()?;

        info!("Printed value: {}", n);

        Ok(Value::Number(n))
    }
}
