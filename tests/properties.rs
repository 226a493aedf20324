#[cfg(test)]
mod property_tests {
    use std::io::Cursor;

    use proptest::prelude::*;
    use yat::*;

    fn eval(expr: &Expr, scope: &ScopeRef) -> Result<Option<Value>> {
        Interpreter::new(Cursor::new(Vec::new()), Vec::new()).evaluate(expr, scope)
    }

    fn eval_number(expr: &Expr) -> i64 {
        match eval(expr, &Scope::root()) {
            Ok(Some(Value::Number(n))) => n,
            other => panic!("Expected a number, got {:?}", other),
        }
    }

    fn small() -> impl Strategy<Value = i64> {
        -1_000_000i64..1_000_000
    }

    fn nonzero() -> impl Strategy<Value = i64> {
        small().prop_filter("divisor must be nonzero", |r| *r != 0)
    }

    proptest! {
        #[test]
        fn floor_division_and_modulo_agree(l in small(), r in nonzero()) {
            let q = eval_number(&Expr::binary(Expr::number(l), BinaryOp::Div, Expr::number(r)));
            let m = eval_number(&Expr::binary(Expr::number(l), BinaryOp::Mod, Expr::number(r)));

            prop_assert_eq!(q, (l as f64 / r as f64).floor() as i64);
            prop_assert_eq!(l, q * r + m);
            prop_assert!(m == 0 || (m < 0) == (r < 0));
            prop_assert!(m.abs() < r.abs());
        }

        #[test]
        fn comparisons_produce_zero_or_one(l in small(), r in small()) {
            let cases = [
                (BinaryOp::Lt, l < r),
                (BinaryOp::Gt, l > r),
                (BinaryOp::Le, l <= r),
                (BinaryOp::Ge, l >= r),
                (BinaryOp::Eq, l == r),
                (BinaryOp::Ne, l != r),
            ];
            for (op, expected) in cases {
                let result = eval_number(&Expr::binary(Expr::number(l), op, Expr::number(r)));
                prop_assert_eq!(result, expected as i64);
            }
        }

        #[test]
        fn arithmetic_matches_integers(l in small(), r in small()) {
            prop_assert_eq!(eval_number(&Expr::binary(Expr::number(l), BinaryOp::Add, Expr::number(r))), l + r);
            prop_assert_eq!(eval_number(&Expr::binary(Expr::number(l), BinaryOp::Sub, Expr::number(r))), l - r);
            prop_assert_eq!(eval_number(&Expr::binary(Expr::number(l), BinaryOp::Mul, Expr::number(r))), l * r);
        }

        #[test]
        fn logic_returns_an_operand(l in -3i64..3, r in -3i64..3) {
            let and = eval_number(&Expr::binary(Expr::number(l), BinaryOp::And, Expr::number(r)));
            let or = eval_number(&Expr::binary(Expr::number(l), BinaryOp::Or, Expr::number(r)));

            prop_assert_eq!(and, if l != 0 { r } else { l });
            prop_assert_eq!(or, if l != 0 { l } else { r });
        }

        #[test]
        fn unary_operators(i in any::<i64>().prop_filter("negatable", |i| *i != i64::MIN)) {
            prop_assert_eq!(eval_number(&Expr::unary(UnaryOp::Not, Expr::number(i))), (i == 0) as i64);
            prop_assert_eq!(eval_number(&Expr::unary(UnaryOp::Neg, Expr::number(i))), -i);
        }

        #[test]
        fn any_nonzero_condition_is_truthy(c in any::<i64>()) {
            let expr = Expr::conditional(
                Expr::number(c),
                vec![Expr::number(1)],
                Some(vec![Expr::number(2)]),
            );
            prop_assert_eq!(eval_number(&expr), if c != 0 { 1 } else { 2 });
        }

        #[test]
        fn child_bindings_shadow_without_mutating(parent_val in any::<i64>(), child_val in any::<i64>()) {
            let parent = Scope::root();
            parent.borrow_mut().set("x", Value::Number(parent_val));
            parent.borrow_mut().set("y", Value::Number(parent_val));

            let child = Scope::child(&parent);
            child.borrow_mut().set("x", Value::Number(child_val));

            prop_assert_eq!(eval(&Expr::reference("x"), &child).unwrap(), Some(Value::Number(child_val)));
            prop_assert_eq!(eval(&Expr::reference("y"), &child).unwrap(), Some(Value::Number(parent_val)));
            prop_assert_eq!(eval(&Expr::reference("x"), &parent).unwrap(), Some(Value::Number(parent_val)));
        }
    }
}
