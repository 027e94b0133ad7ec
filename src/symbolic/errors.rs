//! Errors raised while turning formula text into a postfix sequence and while evaluating it.
use thiserror::Error;

/// Malformed formula text. `position` is the byte offset into the formula where parsing stopped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("parse error at position {position} near '{fragment}': {message}")]
pub struct ParseError {
    pub position: usize,
    pub fragment: String,
    pub message: String,
}

impl ParseError {
    /// longest fragment of the remaining input quoted in a message
    const FRAGMENT_LEN: usize = 16;

    pub fn new(formula: &str, remaining: &str, message: impl Into<String>) -> Self {
        let position = formula.len().saturating_sub(remaining.len());
        let fragment: String = remaining.chars().take(Self::FRAGMENT_LEN).collect();
        Self {
            position,
            fragment,
            message: message.into(),
        }
    }
}

/// Failure while computing the value of a postfix sequence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("invalid identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("could not convert '{0}' to a number")]
    InvalidLiteral(String),
    #[error("math domain error: {operation} is undefined for {argument}")]
    Domain { operation: String, argument: String },
    #[error("malformed postfix sequence: {0}")]
    MalformedSequence(String),
}

/// Either stage of turning formula text into a number
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}
