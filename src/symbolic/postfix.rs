//! Postfix (reverse-Polish) instruction sequence produced by the parser and consumed by the evaluator.
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// dead zone of the `sgn` function: arguments closer to zero than this are treated as zero
pub const SGN_EPSILON: f64 = 1e-12;

/// Binary arithmetic operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    /// apply the operator as `lhs OP rhs`
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// Named mathematical constant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Constant {
    #[strum(serialize = "PI")]
    Pi,
    #[strum(serialize = "E")]
    E,
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }

    /// constants are keywords matched without regard to case: `pi`, `Pi` and `PI` are the same token
    pub fn from_name(name: &str) -> Option<Constant> {
        if name.eq_ignore_ascii_case("pi") {
            Some(Constant::Pi)
        } else if name.eq_ignore_ascii_case("e") {
            Some(Constant::E)
        } else {
            None
        }
    }
}

/// Registry of single-argument real functions available in formulas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Sqrt,
    Abs,
    Trunc,
    Round,
    Sgn,
}

impl MathFunction {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            MathFunction::Sin => x.sin(),
            MathFunction::Cos => x.cos(),
            MathFunction::Tan => x.tan(),
            MathFunction::Asin => x.asin(),
            MathFunction::Acos => x.acos(),
            MathFunction::Atan => x.atan(),
            MathFunction::Sinh => x.sinh(),
            MathFunction::Cosh => x.cosh(),
            MathFunction::Tanh => x.tanh(),
            MathFunction::Exp => x.exp(),
            MathFunction::Ln => x.ln(),
            MathFunction::Log10 => x.log10(),
            MathFunction::Sqrt => x.sqrt(),
            MathFunction::Abs => x.abs(),
            MathFunction::Trunc => x.trunc(),
            // half-to-even, so round(2.5) == 2
            MathFunction::Round => x.round_ties_even(),
            MathFunction::Sgn => {
                if x > SGN_EPSILON {
                    1.0
                } else if x < -SGN_EPSILON {
                    -1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// One instruction of a postfix sequence
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// numeric literal kept as written; converted to `f64` at evaluation time
    Literal(String),
    /// `+ - * / ^`
    Binary(BinaryOp),
    /// negation of the single following operand
    UnaryMinus,
    /// `PI` or `E`
    Constant(Constant),
    /// named function applied to one operand
    Function(MathFunction),
    /// free variable or a name bound by assignment
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "{}", text),
            Token::Binary(op) => write!(f, "{}", op.symbol()),
            Token::UnaryMinus => write!(f, "unary -"),
            Token::Constant(c) => write!(f, "{}", c),
            Token::Function(func) => write!(f, "{}", func),
            Token::Ident(name) => write!(f, "{}", name),
        }
    }
}

/// Immutable postfix sequence. The last token is the root of the expression.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Postfix::new(tokens)
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_function_names_round_trip_through_registry() {
        for func in MathFunction::iter() {
            let name = func.to_string();
            assert_eq!(MathFunction::from_str(&name).unwrap(), func);
        }
        assert_eq!(MathFunction::from_str("log10").unwrap(), MathFunction::Log10);
        assert!(MathFunction::from_str("foo").is_err());
    }

    #[test]
    fn test_round_is_half_to_even() {
        assert_eq!(MathFunction::Round.apply(2.5), 2.0);
        assert_eq!(MathFunction::Round.apply(3.5), 4.0);
        assert_eq!(MathFunction::Round.apply(-2.5), -2.0);
    }

    #[test]
    fn test_sgn_dead_zone() {
        assert_eq!(MathFunction::Sgn.apply(1e-13), 0.0);
        assert_eq!(MathFunction::Sgn.apply(-3.0), -1.0);
        assert_eq!(MathFunction::Sgn.apply(0.1), 1.0);
    }

    #[test]
    fn test_constants_are_case_insensitive() {
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("PI"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("e"), Some(Constant::E));
        assert_eq!(Constant::from_name("exp"), None);
        assert_eq!(Constant::Pi.to_string(), "PI");
    }

    #[test]
    fn test_display_lists_tokens() {
        let postfix = Postfix::from(vec![
            Token::Ident("x".to_string()),
            Token::Ident("a".to_string()),
            Token::Binary(BinaryOp::Mul),
            Token::Ident("x".to_string()),
            Token::Binary(BinaryOp::Add),
        ]);
        assert_eq!(postfix.to_string(), "[x, a, *, x, +]");
    }
}
