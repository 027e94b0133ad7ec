#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// Formula text to postfix instruction sequence
///
///# Example
/// ```
/// use RustedExtremum::symbolic::parse_expr::parse_expression;
/// let postfix = parse_expression("-(x-3)^2").unwrap();
/// println!("postfix: {}", postfix); // [x, 3, -, 2, ^, unary -]
/// ```
pub mod parse_expr;
/// tokens of the postfix sequence: operators, constants, the function registry
pub mod postfix;
/// evaluation of a postfix sequence against variable bindings
///# Example
/// ```
/// use RustedExtremum::symbolic::environment::Environment;
/// use RustedExtremum::symbolic::evaluate::evaluate_stack;
/// use RustedExtremum::symbolic::parse_expr::parse_expression;
/// let postfix = parse_expression("x^2 + 1").unwrap();
/// let mut env = Environment::new();
/// env.bind("x", 3.0);
/// assert_eq!(evaluate_stack(&postfix, &env).unwrap(), 10.0);
/// ```
pub mod evaluate;
/// per-search variable bindings
pub mod environment;
/// formula = assignment preamble + objective; parse once, evaluate many times
pub mod formula;
pub mod errors;
