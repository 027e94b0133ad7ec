//! Error taxonomy of the bracketing searches: configuration, parse and evaluation failures.
use crate::symbolic::errors::{EvalError, FormulaError, ParseError};
use thiserror::Error;

/// Invalid search setup, detected before the first function evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("mode '{0}' is not specified. Use 'max' or 'min'")]
    InvalidMode(String),
    #[error("unknown search method '{0}'. Use 'dichotomous', 'golden_section' or 'fibonacci'")]
    InvalidMethod(String),
    #[error("A must be less than B (got A = {a}, B = {b})")]
    InvalidBounds { a: f64, b: f64 },
    #[error("interval length L must be positive and finite (got {0})")]
    InvalidLength(f64),
    #[error("epsilon must be positive and finite (got {0})")]
    InvalidEps(f64),
    #[error("double epsilon must be less than L (eps = {eps}, L = {length})")]
    EpsTooLarge { eps: f64, length: f64 },
    #[error("L = {length} is below the floating point resolution of the bracket [{a}, {b}]")]
    LengthBelowResolution { a: f64, b: f64, length: f64 },
    #[error(
        "L - 2*eps = {margin} is below the floating point resolution of the bracket [{a}, {b}] (eps = {eps}, L = {length})"
    )]
    MarginBelowResolution {
        a: f64,
        b: f64,
        eps: f64,
        length: f64,
        margin: f64,
    },
    #[error("bracket [{a}, {b}] stopped shrinking at step {step}")]
    Stalled { a: f64, b: f64, step: usize },
    #[error("'{0}' cannot name the free variable: expected an identifier other than PI or E")]
    InvalidVariable(String),
    #[error("(B - A)/L = {ratio} exceeds the largest Fibonacci number in the table ({max})")]
    FibonacciTableExceeded { ratio: f64, max: f64 },
    #[error("loglevel must be off, error, warn, info, debug or trace (got '{0}')")]
    InvalidLogLevel(String),
    #[error("cannot open log file '{path}': {message}")]
    LogFile { path: String, message: String },
    #[error("cannot write trace file '{path}': {message}")]
    TraceFile { path: String, message: String },
    #[error("cannot read task file '{path}': {message}")]
    TaskFile { path: String, message: String },
    #[error("task '{section}': {message}")]
    Task { section: String, message: String },
}

/// Any failure of a search call. The three kinds are kept apart so callers can tell a bad
/// setup from a bad formula from a formula that cannot be evaluated at some probe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvalError),
}

impl From<FormulaError> for SearchError {
    fn from(error: FormulaError) -> Self {
        match error {
            FormulaError::Parse(e) => SearchError::Parse(e),
            FormulaError::Evaluation(e) => SearchError::Evaluation(e),
        }
    }
}
