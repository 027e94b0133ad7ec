//! a module turns formula text into postfix instruction sequences
//!# Example
//! ```
//! use RustedExtremum::symbolic::parse_expr::parse_statements;
//! let statements = parse_statements("a = 2; a*x^2 - sin(x)").unwrap();
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[0].target.as_deref(), Some("a"));
//! println!("postfix of the objective: {}", statements[1].postfix);
//! ```
//            grammar (lowest precedence first)
//  formula   := statement (';' statement)* ';'?
//  statement := identifier '=' expr | expr
//  expr      := term (('+' | '-') term)*
//  term      := factor (('*' | '/') factor)*
//  factor    := '-' factor | '+' factor | power
//  power     := atom ('^' factor)?
//  atom      := '(' expr ')' | function '(' expr ')' | constant | identifier | literal
// every rule returns the postfix fragment of what it matched, so a binary rule
// concatenates  left ++ right ++ [op]
// every unary sign, exponent or bracket nests one level deeper, up to MAX_NESTING
use crate::symbolic::errors::ParseError;
use crate::symbolic::postfix::{BinaryOp, Constant, MathFunction, Postfix, Token};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, cut, map, opt, recognize, value},
    error::ErrorKind,
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};
use std::str::FromStr;

/// One `target = expression` or bare `expression` of a formula
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub target: Option<String>,
    pub postfix: Postfix,
    /// byte offset of the statement in the formula text
    pub position: usize,
}

/// Error carried through the combinators: where parsing stopped and why
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarError<'a> {
    input: &'a str,
    message: String,
}

impl<'a> GrammarError<'a> {
    fn new(input: &'a str, message: impl Into<String>) -> Self {
        Self {
            input,
            message: message.into(),
        }
    }
}

impl<'a> nom::error::ParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Eof => "unexpected input after the end of the expression".to_string(),
            ErrorKind::Char => "unexpected character".to_string(),
            ErrorKind::Digit | ErrorKind::Alpha | ErrorKind::Tag => {
                "expected a number, a name or '('".to_string()
            }
            other => format!("unexpected input ({:?})", other),
        };
        GrammarError::new(input, message)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, O> = IResult<&'a str, O, GrammarError<'a>>;
type Tokens = Vec<Token>;

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = GrammarError<'a>>
where
    P: Parser<&'a str, Output = O, Error = GrammarError<'a>>,
{
    delimited(multispace0, inner, multispace0)
}

/// like `ws(char(c))` but fails with a fixed message
fn expect<'a>(
    c: char,
    message: &'static str,
) -> impl Parser<&'a str, Output = char, Error = GrammarError<'a>> {
    move |input: &'a str| -> PResult<'a, char> {
        ws(char(c))
            .parse(input)
            .map_err(|e| e.map(|err: GrammarError<'a>| GrammarError::new(err.input, message)))
    }
}

/// Parses an identifier (letter or underscore, then letters, digits, underscores)
fn identifier(input: &str) -> PResult<&str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// whether the whole of `text` is an identifier
pub fn is_identifier(text: &str) -> bool {
    all_consuming(identifier).parse(text).is_ok()
}

fn literal(input: &str) -> PResult<Tokens> {
    let mantissa = alt((
        recognize((digit1, opt((char('.'), digit0)))),
        recognize((char('.'), digit1)),
    ));
    let exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));
    map(recognize((mantissa, exponent)), |text: &str| {
        vec![Token::Literal(text.to_string())]
    })
    .parse(input)
}

/// nesting bound for brackets, function calls, unary signs and `^` chains
pub const MAX_NESTING: usize = 64;

/// function call, named constant or plain identifier
fn named<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    let (rest, name) = identifier(input)?;
    let (after_space, _) = multispace0::<&str, GrammarError>(rest)?;
    if after_space.starts_with('(') {
        let func = MathFunction::from_str(name).map_err(|_| {
            nom::Err::Failure(GrammarError::new(
                input,
                format!("unknown function '{}'", name),
            ))
        })?;
        let (rest, mut tokens) = parenthesized(after_space, depth)?;
        tokens.push(Token::Function(func));
        return Ok((rest, tokens));
    }
    if let Some(constant) = Constant::from_name(name) {
        return Ok((rest, vec![Token::Constant(constant)]));
    }
    Ok((rest, vec![Token::Ident(name.to_string())]))
}

fn parenthesized<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    delimited(
        char('('),
        cut(|i: &'a str| expr(i, depth + 1)),
        cut(expect(')', "missing closing bracket ')'")),
    )
    .parse(input)
}

fn atom<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    let (input, _) = multispace0::<&str, GrammarError>(input)?;
    alt((
        |i: &'a str| parenthesized(i, depth),
        |i: &'a str| named(i, depth),
        literal,
    ))
    .parse(input)
    .map_err(|e| match e {
        nom::Err::Error(_) => {
            nom::Err::Error(GrammarError::new(input, "expected a number, a name or '('"))
        }
        other => other,
    })
}

fn power<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    let (input, mut base) = atom(input, depth)?;
    let (input, exponent) =
        opt(preceded(ws(char('^')), cut(|i: &'a str| factor(i, depth + 1)))).parse(input)?;
    if let Some(exponent) = exponent {
        base.extend(exponent);
        base.push(Token::Binary(BinaryOp::Pow));
    }
    Ok((input, base))
}

fn factor<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    if depth > MAX_NESTING {
        return Err(nom::Err::Failure(GrammarError::new(
            input,
            "expression nested too deeply",
        )));
    }
    alt((
        map(
            preceded(ws(char('-')), cut(|i: &'a str| factor(i, depth + 1))),
            |mut tokens: Tokens| {
                tokens.push(Token::UnaryMinus);
                tokens
            },
        ),
        preceded(ws(char('+')), cut(|i: &'a str| factor(i, depth + 1))),
        |i: &'a str| power(i, depth),
    ))
    .parse(input)
}

fn fold_left(first: Tokens, rest: Vec<(BinaryOp, Tokens)>) -> Tokens {
    rest.into_iter().fold(first, |mut acc, (op, rhs)| {
        acc.extend(rhs);
        acc.push(Token::Binary(op));
        acc
    })
}

fn multiplicative_op(input: &str) -> PResult<BinaryOp> {
    alt((
        value(BinaryOp::Mul, char('*')),
        value(BinaryOp::Div, char('/')),
    ))
    .parse(input)
}

fn additive_op(input: &str) -> PResult<BinaryOp> {
    alt((
        value(BinaryOp::Add, char('+')),
        value(BinaryOp::Sub, char('-')),
    ))
    .parse(input)
}

fn term<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    let (input, first) = factor(input, depth)?;
    let (input, rest) = many0(pair(
        ws(multiplicative_op),
        cut(|i: &'a str| factor(i, depth)),
    ))
    .parse(input)?;
    Ok((input, fold_left(first, rest)))
}

fn expr<'a>(input: &'a str, depth: usize) -> PResult<'a, Tokens> {
    let (input, first) = term(input, depth)?;
    let (input, rest) =
        many0(pair(ws(additive_op), cut(|i: &'a str| term(i, depth)))).parse(input)?;
    Ok((input, fold_left(first, rest)))
}

/// `target = expr` or `expr`; returns the input the statement started at
fn statement<'a>(input: &'a str) -> PResult<'a, (&'a str, Statement)> {
    let (input, _) = multispace0::<&str, GrammarError>(input)?;
    let start = input;
    let (input, target) = opt(terminated(identifier, ws(char('=')))).parse(input)?;
    if let Some(name) = target {
        if Constant::from_name(name).is_some() {
            return Err(nom::Err::Failure(GrammarError::new(
                start,
                format!("cannot assign to constant '{}'", name),
            )));
        }
    }
    let (input, tokens) = terminated(|i: &'a str| expr(i, 0), multispace0).parse(input)?;
    let statement = Statement {
        target: target.map(str::to_string),
        postfix: Postfix::new(tokens),
        position: 0,
    };
    Ok((input, (start, statement)))
}

/// Parse a whole formula into its statements, in source order.
pub fn parse_statements(formula: &str) -> Result<Vec<Statement>, ParseError> {
    let mut parser = all_consuming(terminated(
        separated_list1(ws(char(';')), statement),
        opt(ws(char(';'))),
    ));
    match parser.parse(formula) {
        Ok((_, parsed)) => Ok(parsed
            .into_iter()
            .map(|(start, mut statement)| {
                statement.position = formula.len() - start.len();
                statement
            })
            .collect()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(ParseError::new(formula, e.input, e.message))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(formula, "", "incomplete input")),
    }
}

/// Parse a single expression (no assignment, no `;`) into a postfix sequence.
pub fn parse_expression(text: &str) -> Result<Postfix, ParseError> {
    let mut statements = parse_statements(text)?;
    if statements.len() != 1 || statements[0].target.is_some() {
        return Err(ParseError::new(
            text,
            text,
            "expected a single expression without assignment",
        ));
    }
    Ok(statements.remove(0).postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpn(text: &str) -> String {
        parse_expression(text).unwrap().to_string()
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(rpn("1 + 2 * 3"), "[1, 2, 3, *, +]");
        assert_eq!(rpn("10 - 4 - 3"), "[10, 4, -, 3, -]");
        assert_eq!(rpn("2^3^2"), "[2, 3, 2, ^, ^]");
        assert_eq!(rpn("8 / 2 / 2"), "[8, 2, /, 2, /]");
    }

    #[test]
    fn test_unary_minus_binds_weaker_than_power() {
        assert_eq!(rpn("-(x-3)^2"), "[x, 3, -, 2, ^, unary -]");
        assert_eq!(rpn("-x^2"), "[x, 2, ^, unary -]");
        assert_eq!(rpn("2^-x"), "[2, x, unary -, ^]");
        assert_eq!(rpn("--x"), "[x, unary -, unary -]");
    }

    #[test]
    fn test_functions_constants_and_literals() {
        assert_eq!(rpn("sin(PI/2)"), "[PI, 2, /, sin]");
        assert_eq!(rpn("pi * e"), "[PI, E, *]");
        assert_eq!(rpn("exp (x)"), "[x, exp]");
        assert_eq!(rpn("1.5e-3 + .25 + 2."), "[1.5e-3, .25, +, 2., +]");
        assert_eq!(rpn(" ( x ) "), "[x]");
    }

    #[test]
    fn test_assignment_statements() {
        let statements = parse_statements("a = 2; b=a*3 ; f = a*x + b;").unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].target.as_deref(), Some("a"));
        assert_eq!(statements[1].target.as_deref(), Some("b"));
        assert_eq!(statements[2].target.as_deref(), Some("f"));
        assert_eq!(statements[2].postfix.to_string(), "[a, x, *, b, +]");
        assert_eq!(statements[0].position, 0);
        assert_eq!(statements[1].position, 7);
    }

    #[test]
    fn test_parse_errors_carry_position() {
        let err = parse_expression("x + ").unwrap_err();
        assert_eq!(err.position, 4);

        let err = parse_expression("(x + 1").unwrap_err();
        assert_eq!(err.position, 6);
        assert!(err.message.contains("')'"));

        let err = parse_expression("foo(x)").unwrap_err();
        assert_eq!(err.position, 0);
        assert!(err.message.contains("unknown function 'foo'"));

        let err = parse_expression("x $ 2").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.fragment, "$ 2");

        assert!(parse_expression("").is_err());
        assert!(parse_expression("2x").is_err());
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_t1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("x y"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_cannot_assign_constant() {
        let err = parse_statements("PI = 3").unwrap_err();
        assert!(err.message.contains("constant"));
    }

    #[test]
    fn test_single_expression_rejects_assignment() {
        assert!(parse_expression("y = x").is_err());
        assert!(parse_expression("x; x").is_err());
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let brackets = format!("{}x{}", "(".repeat(2000), ")".repeat(2000));
        let err = parse_expression(&brackets).unwrap_err();
        assert!(err.message.contains("nested too deeply"));

        let signs = format!("{}x", "-".repeat(200_000));
        let err = parse_expression(&signs).unwrap_err();
        assert!(err.message.contains("nested too deeply"));

        let powers = format!("2{}", "^2".repeat(10_000));
        assert!(parse_expression(&powers).is_err());

        let calls = format!("{}x{}", "sin(".repeat(1000), ")".repeat(1000));
        assert!(parse_expression(&calls).is_err());
    }

    #[test]
    fn test_moderate_nesting_accepted() {
        let brackets = format!("{}x{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(rpn(&brackets), "[x]");
        assert_eq!(rpn("-(-(-(sin(cos(x)))))"), "[x, cos, sin, unary -, unary -, unary -]");
        // flat sums are iterative and unbounded
        let sum = vec!["x"; 5000].join(" + ");
        assert_eq!(parse_expression(&sum).unwrap().len(), 9999);
    }
}
