use crate::expr::Expr;
use crate::value::Function;

const INDENT: &str = "    ";

/// Renders a program tree back into readable yat source.
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Renders a single expression at the top level, without a trailing `;`.
    pub fn print(expr: &Expr) -> String {
        Self::render(expr, 0)
    }

    /// Renders a statement sequence, one `;`-terminated statement per line.
    pub fn program(program: &[Expr]) -> String {
        program
            .iter()
            .map(|stmt| format!("{};\n", Self::render(stmt, 0)))
            .collect()
    }

    fn render(expr: &Expr, depth: usize) -> String {
        match expr {
            // ── atoms ───────────────────────────────────────────────────
            Expr::Number(n) => n.to_string(),

            Expr::Reference(name) => name.clone(),

            // ── operators ───────────────────────────────────────────────
            Expr::BinaryOperation(left, op, right) => format!(
                "{} {} {}",
                Self::operand(left, depth),
                op,
                Self::operand(right, depth)
            ),

            Expr::UnaryOperation(op, operand) => {
                format!("{}{}", op, Self::operand(operand, depth))
            }

            // ── control flow ────────────────────────────────────────────
            Expr::Conditional(condition, if_true, if_false) => {
                let mut s = format!(
                    "if ({}) {}",
                    Self::render(condition, depth),
                    Self::block(if_true, depth)
                );
                if let Some(if_false) = if_false {
                    s.push_str(" else ");
                    s.push_str(&Self::block(if_false, depth));
                }
                s
            }

            // ── functions ───────────────────────────────────────────────
            Expr::Function(function) => format!("def {}", Self::signature(function, depth)),

            Expr::FunctionDefinition(name, function) => match function.as_ref() {
                Expr::Function(function) => {
                    format!("def {}{}", name, Self::signature(function, depth))
                }
                other => format!("def {} = {}", name, Self::render(other, depth)),
            },

            Expr::FunctionCall(callee, args) => {
                let mut s = Self::operand(callee, depth);
                s.push('(');
                let args: Vec<String> = args.iter().map(|arg| Self::render(arg, depth)).collect();
                s.push_str(&args.join(", "));
                s.push(')');
                s
            }

            // ── i/o ─────────────────────────────────────────────────────
            Expr::Read(name) => format!("read {}", name),

            Expr::Print(expr) => format!("print {}", Self::render(expr, depth)),
        }
    }

    // Operators and calls bind tighter than anything but atoms.
    fn operand(expr: &Expr, depth: usize) -> String {
        match expr {
            Expr::Number(n) if *n < 0 => format!("({})", n),
            Expr::Number(_) | Expr::Reference(_) | Expr::FunctionCall(..) => {
                Self::render(expr, depth)
            }
            _ => format!("({})", Self::render(expr, depth)),
        }
    }

    fn signature(function: &Function, depth: usize) -> String {
        format!(
            "({}) {}",
            function.params.join(", "),
            Self::block(&function.body, depth)
        )
    }

    fn block(body: &[Expr], depth: usize) -> String {
        let mut s = String::from("{\n");
        for stmt in body {
            s.push_str(&INDENT.repeat(depth + 1));
            s.push_str(&Self::render(stmt, depth + 1));
            s.push_str(";\n");
        }
        s.push_str(&INDENT.repeat(depth));
        s.push('}');
        s
    }
}
