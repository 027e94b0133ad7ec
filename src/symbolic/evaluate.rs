//! Stack evaluation of a postfix sequence.
//!
//! The last token of the sequence is the root of the expression. Tokens are read left to right
//! onto a value stack; a binary operator pops its right operand first, then its left operand,
//! and pushes `left OP right`. The order matters for `-`, `/` and `^`.
use crate::symbolic::environment::Environment;
use crate::symbolic::errors::EvalError;
use crate::symbolic::postfix::{BinaryOp, MathFunction, Postfix, Token};

/// Evaluate `postfix` with the identifiers bound in `env`.
///
/// Reads the environment only. Fails on an unbound identifier, a literal that is not a
/// number, a math domain violation, or a sequence that does not describe exactly one value.
pub fn evaluate_stack(postfix: &Postfix, env: &Environment) -> Result<f64, EvalError> {
    let tokens = postfix.tokens();
    if tokens.is_empty() {
        return Err(EvalError::MalformedSequence("empty sequence".to_string()));
    }
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let value = match token {
            Token::UnaryMinus => -pop(&mut stack)?,
            Token::Binary(op) => {
                let rhs = pop(&mut stack)?;
                let lhs = pop(&mut stack)?;
                apply_binary(*op, lhs, rhs)?
            }
            Token::Constant(constant) => constant.value(),
            Token::Function(func) => apply_function(*func, pop(&mut stack)?)?,
            Token::Ident(name) => env
                .get(name)
                .ok_or_else(|| EvalError::UnknownIdentifier(name.clone()))?,
            Token::Literal(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidLiteral(text.clone()))?,
        };
        stack.push(value);
    }
    match stack.as_slice() {
        [value] => Ok(*value),
        values => Err(EvalError::MalformedSequence(format!(
            "{} value(s) left unused",
            values.len().saturating_sub(1)
        ))),
    }
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, EvalError> {
    stack
        .pop()
        .ok_or_else(|| EvalError::MalformedSequence("operand missing".to_string()))
}

fn apply_binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    let undefined = || EvalError::Domain {
        operation: op.symbol().to_string(),
        argument: format!("({}, {})", lhs, rhs),
    };
    match op {
        BinaryOp::Div if rhs == 0.0 => Err(undefined()),
        BinaryOp::Pow if lhs == 0.0 && rhs < 0.0 => Err(undefined()),
        _ => {
            let value = op.apply(lhs, rhs);
            if value.is_nan() && !lhs.is_nan() && !rhs.is_nan() {
                Err(undefined())
            } else {
                Ok(value)
            }
        }
    }
}

fn apply_function(func: MathFunction, arg: f64) -> Result<f64, EvalError> {
    let value = func.apply(arg);
    if value.is_nan() && !arg.is_nan() {
        return Err(EvalError::Domain {
            operation: func.to_string(),
            argument: arg.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::postfix::Constant;
    use approx::assert_relative_eq;

    fn lit(text: &str) -> Token {
        Token::Literal(text.to_string())
    }

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test]
    fn test_subtraction_uses_left_minus_right() {
        // 10 - 4
        let postfix = Postfix::from(vec![lit("10"), lit("4"), Token::Binary(BinaryOp::Sub)]);
        assert_eq!(evaluate_stack(&postfix, &Environment::new()).unwrap(), 6.0);
    }

    #[test]
    fn test_division_and_power_operand_order() {
        let div = Postfix::from(vec![lit("1"), lit("4"), Token::Binary(BinaryOp::Div)]);
        assert_eq!(evaluate_stack(&div, &Environment::new()).unwrap(), 0.25);
        let pow = Postfix::from(vec![lit("2"), lit("3"), Token::Binary(BinaryOp::Pow)]);
        assert_eq!(evaluate_stack(&pow, &Environment::new()).unwrap(), 8.0);
    }

    #[test]
    fn test_nested_sequence_with_variable() {
        // (x - 3) ^ 2 negated, at x = 5
        let postfix = Postfix::from(vec![
            ident("x"),
            lit("3"),
            Token::Binary(BinaryOp::Sub),
            lit("2"),
            Token::Binary(BinaryOp::Pow),
            Token::UnaryMinus,
        ]);
        let mut env = Environment::new();
        env.bind("x", 5.0);
        assert_eq!(evaluate_stack(&postfix, &env).unwrap(), -4.0);
    }

    #[test]
    fn test_constants_full_precision() {
        let pi = Postfix::from(vec![Token::Constant(Constant::Pi)]);
        let e = Postfix::from(vec![Token::Constant(Constant::E)]);
        assert_eq!(evaluate_stack(&pi, &Environment::new()).unwrap(), std::f64::consts::PI);
        assert_eq!(evaluate_stack(&e, &Environment::new()).unwrap(), std::f64::consts::E);
    }

    #[test]
    fn test_function_application() {
        let postfix = Postfix::from(vec![
            Token::Constant(Constant::Pi),
            lit("2"),
            Token::Binary(BinaryOp::Div),
            Token::Function(MathFunction::Sin),
        ]);
        assert_relative_eq!(
            evaluate_stack(&postfix, &Environment::new()).unwrap(),
            1.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_unknown_identifier_named() {
        let postfix = Postfix::from(vec![ident("y"), lit("1"), Token::Binary(BinaryOp::Add)]);
        let err = evaluate_stack(&postfix, &Environment::new()).unwrap_err();
        assert_eq!(err, EvalError::UnknownIdentifier("y".to_string()));
        assert!(err.to_string().contains("'y'"));
    }

    #[test]
    fn test_malformed_literal() {
        let postfix = Postfix::from(vec![lit("1.2.3")]);
        assert_eq!(
            evaluate_stack(&postfix, &Environment::new()).unwrap_err(),
            EvalError::InvalidLiteral("1.2.3".to_string())
        );
    }

    #[test]
    fn test_domain_errors() {
        let sqrt = Postfix::from(vec![lit("-1"), Token::Function(MathFunction::Sqrt)]);
        assert!(matches!(
            evaluate_stack(&sqrt, &Environment::new()),
            Err(EvalError::Domain { .. })
        ));
        let div = Postfix::from(vec![lit("1"), lit("0"), Token::Binary(BinaryOp::Div)]);
        assert!(matches!(
            evaluate_stack(&div, &Environment::new()),
            Err(EvalError::Domain { .. })
        ));
        let pow = Postfix::from(vec![lit("-8"), lit("0.5"), Token::Binary(BinaryOp::Pow)]);
        assert!(matches!(
            evaluate_stack(&pow, &Environment::new()),
            Err(EvalError::Domain { .. })
        ));
    }

    #[test]
    fn test_malformed_sequences() {
        let missing = Postfix::from(vec![lit("1"), Token::Binary(BinaryOp::Add)]);
        assert!(matches!(
            evaluate_stack(&missing, &Environment::new()),
            Err(EvalError::MalformedSequence(_))
        ));
        let leftover = Postfix::from(vec![lit("1"), lit("2")]);
        assert!(matches!(
            evaluate_stack(&leftover, &Environment::new()),
            Err(EvalError::MalformedSequence(_))
        ));
        assert!(evaluate_stack(&Postfix::default(), &Environment::new()).is_err());
    }

    #[test]
    fn test_long_chains_do_not_recurse() {
        let mut tokens = vec![ident("x")];
        tokens.extend(std::iter::repeat_n(Token::UnaryMinus, 200_000));
        let mut env = Environment::new();
        env.bind("x", 1.5);
        assert_eq!(evaluate_stack(&Postfix::from(tokens), &env).unwrap(), 1.5);

        // 1 + 1 + ... + 1, folded to the left
        let mut tokens = vec![lit("1")];
        for _ in 0..100_000 {
            tokens.push(lit("1"));
            tokens.push(Token::Binary(BinaryOp::Add));
        }
        assert_eq!(
            evaluate_stack(&Postfix::from(tokens), &Environment::new()).unwrap(),
            100_001.0
        );
    }
}
