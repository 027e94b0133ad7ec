use crate::symbolic::environment::Environment;
use crate::symbolic::errors::EvalError;
use crate::symbolic::formula::Formula;

use super::errors::SearchError;

//////////////////////////////////TRAITS AND IMPLEMENTATIONS/////////////////////////////////
/// Trait for a function of one variable whose extremum is searched
pub trait ObjectiveFunction {
    /// Evaluate the function at point x
    fn evaluate(&mut self, x: f64) -> Result<f64, EvalError>;

    /// Get function name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_function"
    }
}

/// Simple function wrapper for closures
pub struct ClosureFunction<F>
where
    F: FnMut(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureFunction<F>
where
    F: FnMut(f64) -> f64,
{
    pub fn new(func: F, name: &str) -> Self {
        Self {
            func,
            name: name.to_string(),
        }
    }
}

impl<F> ObjectiveFunction for ClosureFunction<F>
where
    F: FnMut(f64) -> f64,
{
    fn evaluate(&mut self, x: f64) -> Result<f64, EvalError> {
        Ok((self.func)(x))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

////////////////////////SYMBOLIC FUNCTIONS//////////////////////////////////////////
/// Formula bound to its own environment: the free variable is rebound before every evaluation.
pub struct SymbolicObjective {
    formula: Formula,
    env: Environment,
    variable: String,
}

impl SymbolicObjective {
    /// Parse `expr_str` and seed a fresh environment from its assignments
    pub fn from_string(expr_str: &str, variable: &str) -> Result<Self, SearchError> {
        let formula = Formula::parse(expr_str)?;
        Ok(Self::from_formula(formula, variable)?)
    }

    pub fn from_formula(formula: Formula, variable: &str) -> Result<Self, EvalError> {
        let env = formula.seed_environment()?;
        Ok(Self {
            formula,
            env,
            variable: variable.to_string(),
        })
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }
}

impl ObjectiveFunction for SymbolicObjective {
    fn evaluate(&mut self, x: f64) -> Result<f64, EvalError> {
        self.formula.evaluate_at(&mut self.env, &self.variable, x)
    }

    fn name(&self) -> &str {
        self.formula.source()
    }
}

/// Counts evaluations of the wrapped function
pub(crate) struct Counted<'a, F: ObjectiveFunction + ?Sized> {
    function: &'a mut F,
    pub(crate) calls: usize,
}

impl<'a, F: ObjectiveFunction + ?Sized> Counted<'a, F> {
    pub(crate) fn new(function: &'a mut F) -> Self {
        Self { function, calls: 0 }
    }

    pub(crate) fn eval(&mut self, x: f64) -> Result<f64, EvalError> {
        self.calls += 1;
        self.function.evaluate(x)
    }

    pub(crate) fn name(&self) -> &str {
        self.function.name()
    }
}
